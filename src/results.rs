use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::error::{LeagueError, LeagueResult};
use crate::schedule::Game;
use crate::team::Roster;
use crate::weeks::WeekBucket;

/// One game row as read back from a week sheet.
///
/// Team names are taken as written, so they may carry formatting noise that
/// prefix matching has to absorb.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub home: String,
    #[serde(default)]
    pub home_score: Option<u32>,
    pub away: String,
    #[serde(default)]
    pub away_score: Option<u32>,
}

impl GameResult {
    pub fn new(
        home: impl Into<String>,
        home_score: Option<u32>,
        away: impl Into<String>,
        away_score: Option<u32>,
    ) -> Self {
        GameResult {
            home: home.into(),
            home_score,
            away: away.into(),
            away_score,
        }
    }

    pub fn played(
        home: impl Into<String>,
        home_score: u32,
        away: impl Into<String>,
        away_score: u32,
    ) -> Self {
        Self::new(home, Some(home_score), away, Some(away_score))
    }
}

impl From<&Game> for GameResult {
    fn from(game: &Game) -> Self {
        GameResult::new(game.home.clone(), game.home_score, game.away.clone(), game.away_score)
    }
}

/// Every game row of one week.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekResults {
    pub week: usize,
    pub games: Vec<GameResult>,
}

impl From<&WeekBucket> for WeekResults {
    fn from(bucket: &WeekBucket) -> Self {
        WeekResults {
            week: bucket.week,
            games: bucket.games.iter().map(GameResult::from).collect(),
        }
    }
}

/// Win/loss record of a team over some set of games.
#[cfg_attr(feature = "python", pyo3::pyclass(get_all))]
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize)]
pub struct TeamRecord {
    pub team: String,
    pub wins: u32,
    pub losses: u32,
    /// Games with equal scores; they count toward neither wins nor losses
    pub ties: u32,
    pub games_played: u32,
    pub points_for: u64,
    pub points_against: u64,
}

impl TeamRecord {
    pub fn new(team: impl Into<String>) -> Self {
        TeamRecord {
            team: team.into(),
            ..Default::default()
        }
    }

    pub fn point_differential(&self) -> i64 {
        self.points_for as i64 - self.points_against as i64
    }

    fn absorb(&mut self, other: &TeamRecord) {
        self.wins += other.wins;
        self.losses += other.losses;
        self.ties += other.ties;
        self.games_played += other.games_played;
        self.points_for += other.points_for;
        self.points_against += other.points_against;
    }
}

/// Per-team records for a single week, in roster order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeekTally {
    pub week: usize,
    pub records: Vec<TeamRecord>,
}

/// Output of one aggregation pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Aggregation {
    /// Season totals, in roster order
    pub totals: Vec<TeamRecord>,
    pub weekly: Vec<WeekTally>,
    /// Rows that were treated as unplayed because only one score was recorded
    pub recovered: Vec<LeagueError>,
}

impl Aggregation {
    pub fn record(&self, team: &str) -> Option<&TeamRecord> {
        self.totals.iter().find(|r| r.team == team)
    }
}

fn blank_records(roster: &Roster) -> Vec<TeamRecord> {
    roster.teams().iter().map(|t| TeamRecord::new(t.name.clone())).collect()
}

fn record_game(
    records: &mut [TeamRecord],
    home: usize,
    away: usize,
    home_score: u32,
    away_score: u32,
) {
    let sides = [(home, home_score, away_score), (away, away_score, home_score)];
    for (side, scored, conceded) in sides {
        let record = &mut records[side];
        record.games_played += 1;
        record.points_for += scored as u64;
        record.points_against += conceded as u64;
    }

    match home_score.cmp(&away_score) {
        Ordering::Greater => {
            records[home].wins += 1;
            records[away].losses += 1;
        }
        Ordering::Less => {
            records[away].wins += 1;
            records[home].losses += 1;
        }
        Ordering::Equal => {
            records[home].ties += 1;
            records[away].ties += 1;
        }
    }
}

/// Tally wins and losses for every team over all recorded weeks.
///
/// Each side of a row resolves to exactly one team through the roster.
/// Wins and losses come out of the same comparison, so over any set of
/// scanned games the total wins equal the total losses. Rows without scores
/// are skipped; rows with a single score are skipped and reported in
/// [`Aggregation::recovered`].
///
/// # Errors
/// `UnknownTeamInResults` when a row names a team that isn't on the roster,
/// `SelfPairing` when both sides resolve to the same team.
pub fn aggregate(roster: &Roster, weeks: &[WeekResults]) -> LeagueResult<Aggregation> {
    let mut totals = blank_records(roster);
    let mut weekly = Vec::with_capacity(weeks.len());
    let mut recovered = Vec::new();

    for week in weeks {
        let mut tally = blank_records(roster);

        for (pos, result) in week.games.iter().enumerate() {
            let game = pos + 1;
            let resolve = |name: &str| {
                roster.resolve(name).ok_or_else(|| LeagueError::UnknownTeamInResults {
                    team: name.to_string(),
                    week: week.week,
                    game,
                })
            };
            let home = resolve(&result.home)?;
            let away = resolve(&result.away)?;
            if home == away {
                return Err(LeagueError::SelfPairing {
                    team: tally[home].team.clone(),
                    week: week.week,
                    game,
                });
            }

            match (result.home_score, result.away_score) {
                (Some(home_score), Some(away_score)) => {
                    record_game(&mut tally, home, away, home_score, away_score)
                }
                (None, None) => {}
                _ => {
                    let err = LeagueError::InconsistentScore {
                        week: week.week,
                        game,
                        home: result.home.clone(),
                        away: result.away.clone(),
                    };
                    warn!("{}", err);
                    recovered.push(err);
                }
            }
        }

        for (total, record) in totals.iter_mut().zip(&tally) {
            total.absorb(record);
        }
        weekly.push(WeekTally {
            week: week.week,
            records: tally,
        });
    }

    debug!("aggregated {} weeks for {} teams", weeks.len(), roster.len());
    Ok(Aggregation {
        totals,
        weekly,
        recovered,
    })
}
