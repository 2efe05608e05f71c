//! League Core - Round-robin scheduling and standings for recreational leagues.
//!
//! Turns a team list and a matchup matrix into a numbered game schedule,
//! spreads it over weeks, tallies recorded results and ranks the teams.
//! Python bindings are available behind the `python` feature.

pub mod constants;
pub mod error;
pub mod league;
pub mod matrix;
pub mod results;
pub mod schedule;
pub mod standings;
pub mod summary;
pub mod team;
pub mod weeks;

#[cfg(feature = "python")]
mod python;

pub use constants::{DEFAULT_GAMES_PER_MATCHUP, DEFAULT_NUM_WEEKS, TIE_BREAK_DIVISOR};
pub use error::{LeagueError, LeagueResult};
pub use league::{
    standings_for_leagues, standings_to_json, weeks_to_json, GamesPerMatchup, League, LeagueConfig,
};
pub use matrix::{read_matrix, MatchupMatrix, MatrixCell};
pub use results::{aggregate, Aggregation, GameResult, TeamRecord, WeekResults, WeekTally};
pub use schedule::{generate_schedule, Game, PairingOrder, Schedule};
pub use standings::{rank_standings, tie_break_key, StandingsRow};
pub use summary::{
    repeated_pairings, team_schedule_stats, teams_off, MatchupDetail, RepeatedPairing,
    TeamScheduleStats,
};
pub use team::{Roster, Team, TeamMatch};
pub use weeks::{
    apply_to_sheets, distribute, games_per_week, next_sunday, week_label, week_labels, WeekBucket,
    WeekSheet,
};
