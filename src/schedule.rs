use log::debug;
use serde::{Deserialize, Serialize};

use crate::matrix::MatchupMatrix;
use crate::team::Roster;

/// A scheduled game.
///
/// Ids are 1-based and gap-free across the whole schedule. Scores stay empty
/// until the host records a result.
#[cfg_attr(feature = "python", pyo3::pyclass(get_all))]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: usize,
    pub home: String,
    pub away: String,
    #[serde(default)]
    pub home_score: Option<u32>,
    #[serde(default)]
    pub away_score: Option<u32>,
}

impl Game {
    pub fn new(id: usize, home: impl Into<String>, away: impl Into<String>) -> Self {
        Game {
            id,
            home: home.into(),
            away: away.into(),
            home_score: None,
            away_score: None,
        }
    }

    /// Both scores have been recorded
    pub fn is_played(&self) -> bool {
        self.home_score.is_some() && self.away_score.is_some()
    }

    pub fn involves(&self, team: &str) -> bool {
        self.home == team || self.away == team
    }
}

/// Order in which pair repetitions are laid out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairingOrder {
    /// Every game of a pair back to back, pairs in combination order
    #[default]
    Consecutive,
    /// Pairs ordered by circle-method rounds, one meeting per pair per pass
    Interleaved,
}

/// Flat, numbered list of games.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize)]
pub struct Schedule {
    games: Vec<Game>,
}

impl Schedule {
    /// Wrap games that were numbered elsewhere, e.g. read back from the host.
    pub fn from_games(games: Vec<Game>) -> Self {
        Schedule { games }
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn into_games(self) -> Vec<Game> {
        self.games
    }
}

/// Expand a matchup matrix into a numbered schedule.
///
/// The earlier-declared team of a pair is always home. With
/// [`PairingOrder::Consecutive`] every pair's games are emitted together, so
/// the same two teams can land in the same week once distributed.
pub fn generate_schedule(roster: &Roster, matrix: &MatchupMatrix, order: PairingOrder) -> Schedule {
    let slots = match order {
        PairingOrder::Consecutive => consecutive_slots(matrix),
        PairingOrder::Interleaved => interleaved_slots(roster.len(), matrix),
    };

    let name = |i: usize| roster.get(i).map(|t| t.name.clone()).unwrap_or_default();
    let games: Vec<Game> = slots
        .into_iter()
        .enumerate()
        .map(|(i, (home, away))| Game::new(i + 1, name(home), name(away)))
        .collect();

    debug!("generated {} games for {} teams ({:?})", games.len(), roster.len(), order);
    Schedule { games }
}

fn consecutive_slots(matrix: &MatchupMatrix) -> Vec<(usize, usize)> {
    matrix
        .pairs()
        .flat_map(|(pair, count)| std::iter::repeat(pair).take(count as usize))
        .collect()
}

/// Circle-method rounds: team 0 stays put while the rest rotate, so every
/// pair meets exactly once across all rounds. Odd rosters get a phantom seat
/// whose pairing is dropped.
fn polygon_rounds(team_count: usize) -> Vec<Vec<(usize, usize)>> {
    let mut ring: Vec<Option<usize>> = (0..team_count).map(Some).collect();
    if team_count % 2 == 1 {
        ring.push(None);
    }
    let size = ring.len();
    if size < 2 {
        return Vec::new();
    }

    let mut rounds = Vec::with_capacity(size - 1);
    for _ in 0..size - 1 {
        let round = (0..size / 2)
            .filter_map(|i| match (ring[i], ring[size - 1 - i]) {
                (Some(a), Some(b)) => Some(if a < b { (a, b) } else { (b, a) }),
                _ => None,
            })
            .collect();
        rounds.push(round);
        ring[1..].rotate_right(1);
    }
    rounds
}

fn interleaved_slots(team_count: usize, matrix: &MatchupMatrix) -> Vec<(usize, usize)> {
    let rounds = polygon_rounds(team_count);
    let passes = matrix.pairs().map(|(_, count)| count).max().unwrap_or(0);

    let mut slots = Vec::with_capacity(matrix.total_games());
    for pass in 0..passes {
        for round in &rounds {
            for &(a, b) in round {
                if matrix.count(a, b) > pass {
                    slots.push((a, b));
                }
            }
        }
    }
    slots
}
