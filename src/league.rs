use chrono::NaiveDate;
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::{DEFAULT_GAMES_PER_MATCHUP, DEFAULT_LEAGUE_NAME, DEFAULT_NUM_WEEKS};
use crate::error::{LeagueError, LeagueResult};
use crate::matrix::{MatchupMatrix, MatrixCell};
use crate::results::{aggregate, Aggregation, WeekResults};
use crate::schedule::{generate_schedule, PairingOrder, Schedule};
use crate::standings::{rank_standings, StandingsRow};
use crate::summary::{team_schedule_stats, TeamScheduleStats};
use crate::team::Roster;
use crate::weeks::{apply_to_sheets, distribute, week_labels, WeekBucket, WeekSheet};

/// Either one count for every pair or a full matchup table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GamesPerMatchup {
    Uniform(u32),
    Matrix(Vec<Vec<MatrixCell>>),
}

impl Default for GamesPerMatchup {
    fn default() -> Self {
        GamesPerMatchup::Uniform(DEFAULT_GAMES_PER_MATCHUP)
    }
}

fn default_name() -> String {
    DEFAULT_LEAGUE_NAME.to_string()
}

fn default_num_weeks() -> usize {
    DEFAULT_NUM_WEEKS
}

/// League settings as supplied by the host.
///
/// ```json
/// {"name": "Winter League", "teams": ["Persephone", "Artemis", "Athena"],
///  "gamesPerMatchup": 2, "numWeeks": 6, "prefixTeams": {"Athena": "Athena"},
///  "startDate": "2026-01-04"}
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueConfig {
    #[serde(default = "default_name")]
    pub name: String,

    pub teams: Vec<String>,

    #[serde(default)]
    pub games_per_matchup: GamesPerMatchup,

    #[serde(default = "default_num_weeks")]
    pub num_weeks: usize,

    /// Team name to the prefix its results are recognized by
    #[serde(default)]
    pub prefix_teams: BTreeMap<String, String>,

    #[serde(default)]
    pub pairing_order: PairingOrder,

    #[serde(default)]
    pub start_date: Option<NaiveDate>,
}

impl LeagueConfig {
    pub fn new(name: impl Into<String>, teams: Vec<String>) -> Self {
        LeagueConfig {
            name: name.into(),
            teams,
            games_per_matchup: GamesPerMatchup::default(),
            num_weeks: DEFAULT_NUM_WEEKS,
            prefix_teams: BTreeMap::new(),
            pairing_order: PairingOrder::default(),
            start_date: None,
        }
    }
}

/// A validated league, ready to schedule and rank.
///
/// Every method recomputes from the stored inputs; nothing is cached between
/// calls.
#[derive(Clone, Debug)]
pub struct League {
    pub name: String,
    roster: Roster,
    matrix: MatchupMatrix,
    num_weeks: usize,
    pairing_order: PairingOrder,
    start_date: Option<NaiveDate>,
}

impl League {
    pub fn from_config(config: &LeagueConfig) -> LeagueResult<Self> {
        let mut roster = Roster::new(&config.teams)?;
        for (team, base) in &config.prefix_teams {
            roster = roster.with_prefix_match(team, base)?;
        }

        if config.num_weeks == 0 {
            return Err(LeagueError::Configuration(
                "number of weeks must be at least 1".to_string(),
            ));
        }

        let matrix = match &config.games_per_matchup {
            GamesPerMatchup::Uniform(count) => MatchupMatrix::uniform(&roster, *count),
            GamesPerMatchup::Matrix(cells) => MatchupMatrix::from_cells(&roster, cells),
        };

        let name = match config.name.trim() {
            "" => default_name(),
            name => name.to_string(),
        };
        debug!("league {:?}: {} teams, {} weeks", name, roster.len(), config.num_weeks);

        Ok(League {
            name,
            roster,
            matrix,
            num_weeks: config.num_weeks,
            pairing_order: config.pairing_order,
            start_date: config.start_date,
        })
    }

    pub fn from_json_str(json: &str) -> LeagueResult<Self> {
        let config: LeagueConfig = serde_json::from_str(json)?;
        Self::from_config(&config)
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn matrix(&self) -> &MatchupMatrix {
        &self.matrix
    }

    pub fn num_weeks(&self) -> usize {
        self.num_weeks
    }

    pub fn schedule(&self) -> Schedule {
        generate_schedule(&self.roster, &self.matrix, self.pairing_order)
    }

    pub fn weeks(&self) -> LeagueResult<Vec<WeekBucket>> {
        distribute(&self.schedule(), self.num_weeks)
    }

    pub fn week_labels(&self) -> Vec<String> {
        week_labels(self.num_weeks, self.start_date)
    }

    /// Fresh week sheets holding the distributed schedule.
    pub fn week_sheets(&self) -> LeagueResult<Vec<WeekSheet>> {
        let mut sheets = Vec::with_capacity(self.num_weeks);
        apply_to_sheets(&mut sheets, &self.weeks()?, self.start_date);
        Ok(sheets)
    }

    pub fn schedule_stats(&self) -> Vec<TeamScheduleStats> {
        team_schedule_stats(&self.roster, self.schedule().games())
    }

    pub fn aggregate(&self, results: &[WeekResults]) -> LeagueResult<Aggregation> {
        aggregate(&self.roster, results)
    }

    pub fn standings(&self, results: &[WeekResults]) -> LeagueResult<Vec<StandingsRow>> {
        let aggregation = self.aggregate(results)?;
        Ok(rank_standings(&self.roster, &aggregation.totals))
    }
}

pub fn weeks_to_json(buckets: &[WeekBucket]) -> LeagueResult<String> {
    Ok(serde_json::to_string_pretty(buckets)?)
}

pub fn standings_to_json(rows: &[StandingsRow]) -> LeagueResult<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}

/// Rank several independent leagues.
///
/// Each league is its own pass over its own results; the passes run in
/// parallel and results come back in input order.
pub fn standings_for_leagues(
    batch: &[(League, Vec<WeekResults>)],
) -> Vec<LeagueResult<Vec<StandingsRow>>> {
    batch
        .par_iter()
        .map(|(league, results)| league.standings(results))
        .collect()
}
