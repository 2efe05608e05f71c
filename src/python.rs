//! Python bindings for the host scripts.
//!
//! Everything here converts between Python values and the core types and
//! then calls straight into the library.

use chrono::{Local, NaiveDate};
use pyo3::exceptions::{PyKeyError, PyValueError};
use pyo3::prelude::*;
use std::collections::BTreeMap;

use crate::constants::{
    DEFAULT_GAMES_PER_MATCHUP, DEFAULT_NUM_WEEKS, DIAGONAL_MARKER, TIE_BREAK_DIVISOR,
};
use crate::error::LeagueError;
use crate::league::League;
use crate::matrix::{MatchupMatrix, MatrixCell};
use crate::results::{aggregate, GameResult, TeamRecord, WeekResults};
use crate::schedule::{generate_schedule, Game, PairingOrder, Schedule};
use crate::standings::{rank_standings, StandingsRow};
use crate::team::Roster;
use crate::weeks::{distribute, next_sunday, week_labels, WeekBucket};

impl From<LeagueError> for PyErr {
    fn from(err: LeagueError) -> PyErr {
        match err {
            LeagueError::UnknownTeamInResults { .. } => PyKeyError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

impl<'py> FromPyObject<'py> for MatrixCell {
    fn extract_bound(ob: &Bound<'py, PyAny>) -> PyResult<Self> {
        if ob.is_none() {
            return Ok(MatrixCell::Empty);
        }
        if let Ok(text) = ob.extract::<String>() {
            return Ok(MatrixCell::Text(text));
        }
        if let Ok(number) = ob.extract::<f64>() {
            return Ok(MatrixCell::Number(number));
        }
        Ok(MatrixCell::Text(ob.str()?.to_string()))
    }
}

impl IntoPy<PyObject> for MatrixCell {
    fn into_py(self, py: Python<'_>) -> PyObject {
        match self {
            MatrixCell::Empty => py.None(),
            MatrixCell::Number(n) if n.fract() == 0.0 => (n as i64).into_py(py),
            MatrixCell::Number(n) => n.into_py(py),
            MatrixCell::Text(text) => text.into_py(py),
        }
    }
}

#[pymethods]
impl Game {
    #[new]
    #[pyo3(signature = (id, home, away, home_score = None, away_score = None))]
    fn py_new(
        id: usize,
        home: String,
        away: String,
        home_score: Option<u32>,
        away_score: Option<u32>,
    ) -> Self {
        Game {
            id,
            home,
            away,
            home_score,
            away_score,
        }
    }

    fn __repr__(&self) -> String {
        format!("Game({}, {:?}, {:?})", self.id, self.home, self.away)
    }
}

#[pymethods]
impl WeekBucket {
    fn __len__(&self) -> usize {
        self.games.len()
    }

    fn __repr__(&self) -> String {
        format!("WeekBucket(week={}, games={})", self.week, self.games.len())
    }
}

#[pymethods]
impl TeamRecord {
    #[getter]
    fn get_point_differential(&self) -> i64 {
        self.point_differential()
    }

    fn __repr__(&self) -> String {
        format!("TeamRecord({:?}, {}-{}-{})", self.team, self.wins, self.losses, self.ties)
    }
}

#[pymethods]
impl StandingsRow {
    fn __str__(&self) -> String {
        format!("{}. {} {}-{}", self.rank, self.team, self.wins, self.losses)
    }

    fn __repr__(&self) -> String {
        format!(
            "StandingsRow({}, {:?}, {}, {}, {})",
            self.rank, self.team, self.wins, self.losses, self.tie_break_key
        )
    }
}

/// (home, home_score, away, away_score) as read from a week sheet
type ResultRow = (String, Option<u32>, String, Option<u32>);

/// Week `i` of the list becomes week number `i + 1`.
fn to_week_results(weeks: Vec<Vec<ResultRow>>) -> Vec<WeekResults> {
    weeks
        .into_iter()
        .enumerate()
        .map(|(i, rows)| WeekResults {
            week: i + 1,
            games: rows
                .into_iter()
                .map(|(home, home_score, away, away_score)| {
                    GameResult::new(home, home_score, away, away_score)
                })
                .collect(),
        })
        .collect()
}

fn build_roster(
    teams: &[String],
    prefix_teams: Option<BTreeMap<String, String>>,
) -> PyResult<Roster> {
    let mut roster = Roster::new(teams)?;
    for (team, base) in prefix_teams.unwrap_or_default() {
        roster = roster.with_prefix_match(&team, &base)?;
    }
    Ok(roster)
}

fn parse_start_date(start_date: Option<&str>) -> PyResult<NaiveDate> {
    match start_date {
        Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map_err(|e| PyValueError::new_err(format!("Invalid start date {:?}: {}", text, e))),
        None => Ok(next_sunday(Local::now().date_naive())),
    }
}

/// Generate the flat, numbered game list.
///
/// # Arguments
/// * `teams` - Team names in declaration order
/// * `matrix` - Optional square table of games per pair; `games_per_matchup` is used when absent
/// * `interleaved` - Order pair repetitions by rounds instead of back to back
#[pyfunction(name = "generate_schedule")]
#[pyo3(signature = (
    teams,
    matrix = None,
    games_per_matchup = DEFAULT_GAMES_PER_MATCHUP,
    interleaved = false
))]
fn py_generate_schedule(
    teams: Vec<String>,
    matrix: Option<Vec<Vec<MatrixCell>>>,
    games_per_matchup: u32,
    interleaved: bool,
) -> PyResult<Vec<Game>> {
    let roster = Roster::new(&teams)?;
    let matrix = match matrix {
        Some(cells) => MatchupMatrix::from_cells(&roster, &cells),
        None => MatchupMatrix::uniform(&roster, games_per_matchup),
    };
    let order = if interleaved {
        PairingOrder::Interleaved
    } else {
        PairingOrder::Consecutive
    };
    Ok(generate_schedule(&roster, &matrix, order).into_games())
}

/// Square matchup table with `games_per_matchup` everywhere off the diagonal.
#[pyfunction]
#[pyo3(signature = (teams, games_per_matchup = DEFAULT_GAMES_PER_MATCHUP))]
fn matchup_template(teams: Vec<String>, games_per_matchup: u32) -> PyResult<Vec<Vec<MatrixCell>>> {
    let roster = Roster::new(&teams)?;
    Ok(MatchupMatrix::uniform(&roster, games_per_matchup).to_cells())
}

#[pyfunction(name = "distribute_weeks")]
#[pyo3(signature = (games, num_weeks = DEFAULT_NUM_WEEKS))]
fn py_distribute_weeks(games: Vec<Game>, num_weeks: usize) -> PyResult<Vec<WeekBucket>> {
    Ok(distribute(&Schedule::from_games(games), num_weeks)?)
}

/// Rank teams from per-week result rows.
///
/// # Arguments
/// * `teams` - Team names in declaration order; later teams win ties
/// * `weeks` - One list of `(home, home_score, away, away_score)` rows per week
/// * `prefix_teams` - Team name to the prefix its result rows start with
#[pyfunction(name = "compute_standings")]
#[pyo3(signature = (teams, weeks, prefix_teams = None))]
fn py_compute_standings(
    teams: Vec<String>,
    weeks: Vec<Vec<ResultRow>>,
    prefix_teams: Option<BTreeMap<String, String>>,
) -> PyResult<Vec<StandingsRow>> {
    let roster = build_roster(&teams, prefix_teams)?;
    let aggregation = aggregate(&roster, &to_week_results(weeks))?;
    Ok(rank_standings(&roster, &aggregation.totals))
}

/// Per-week records for the "this week" tables, one list per week in roster
/// order.
#[pyfunction]
#[pyo3(signature = (teams, weeks, prefix_teams = None))]
fn weekly_records(
    teams: Vec<String>,
    weeks: Vec<Vec<ResultRow>>,
    prefix_teams: Option<BTreeMap<String, String>>,
) -> PyResult<Vec<Vec<TeamRecord>>> {
    let roster = build_roster(&teams, prefix_teams)?;
    let aggregation = aggregate(&roster, &to_week_results(weeks))?;
    Ok(aggregation.weekly.into_iter().map(|w| w.records).collect())
}

/// Week sheet names, dated from `start_date` (YYYY-MM-DD) or from the next
/// Sunday when none is given.
#[pyfunction(name = "week_labels")]
#[pyo3(signature = (num_weeks = DEFAULT_NUM_WEEKS, start_date = None))]
fn py_week_labels(num_weeks: usize, start_date: Option<&str>) -> PyResult<Vec<String>> {
    let start = parse_start_date(start_date)?;
    Ok(week_labels(num_weeks, Some(start)))
}

/// Schedule a league described by a JSON configuration.
#[pyfunction]
fn build_league_schedule(config_json: &str) -> PyResult<Vec<WeekBucket>> {
    let league = League::from_json_str(config_json)?;
    Ok(league.weeks()?)
}

#[pyfunction]
fn league_standings(config_json: &str, weeks: Vec<Vec<ResultRow>>) -> PyResult<Vec<StandingsRow>> {
    let league = League::from_json_str(config_json)?;
    Ok(league.standings(&to_week_results(weeks))?)
}

/// Python module definition
#[pymodule]
fn league_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Classes
    m.add_class::<Game>()?;
    m.add_class::<WeekBucket>()?;
    m.add_class::<TeamRecord>()?;
    m.add_class::<StandingsRow>()?;

    // Scheduling
    m.add_function(wrap_pyfunction!(py_generate_schedule, m)?)?;
    m.add_function(wrap_pyfunction!(matchup_template, m)?)?;
    m.add_function(wrap_pyfunction!(py_distribute_weeks, m)?)?;
    m.add_function(wrap_pyfunction!(py_week_labels, m)?)?;
    m.add_function(wrap_pyfunction!(build_league_schedule, m)?)?;

    // Standings
    m.add_function(wrap_pyfunction!(py_compute_standings, m)?)?;
    m.add_function(wrap_pyfunction!(weekly_records, m)?)?;
    m.add_function(wrap_pyfunction!(league_standings, m)?)?;

    // Constants
    m.add("DEFAULT_GAMES_PER_MATCHUP", DEFAULT_GAMES_PER_MATCHUP)?;
    m.add("DEFAULT_NUM_WEEKS", DEFAULT_NUM_WEEKS)?;
    m.add("DIAGONAL_MARKER", DIAGONAL_MARKER)?;
    m.add("TIE_BREAK_DIVISOR", TIE_BREAK_DIVISOR)?;

    Ok(())
}
