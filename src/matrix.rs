use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::DIAGONAL_MARKER;
use crate::error::{LeagueError, LeagueResult};
use crate::team::Roster;

/// One cell of the matchup matrix as it comes out of the host document.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatrixCell {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

enum CellCount {
    Absent,
    Count(u32),
    Malformed,
}

impl MatrixCell {
    fn count(&self) -> CellCount {
        match self {
            MatrixCell::Empty => CellCount::Absent,
            MatrixCell::Number(n) if n.is_finite() && *n >= 0.0 => {
                CellCount::Count(n.trunc().min(u32::MAX as f64) as u32)
            }
            MatrixCell::Number(_) => CellCount::Malformed,
            MatrixCell::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    CellCount::Absent
                } else if s.bytes().all(|b| b.is_ascii_digit()) {
                    s.parse().map(CellCount::Count).unwrap_or(CellCount::Malformed)
                } else {
                    CellCount::Malformed
                }
            }
        }
    }

    fn describe(&self) -> String {
        match self {
            MatrixCell::Empty => String::new(),
            MatrixCell::Number(n) => n.to_string(),
            MatrixCell::Text(s) => s.clone(),
        }
    }
}

impl From<u32> for MatrixCell {
    fn from(n: u32) -> Self {
        MatrixCell::Number(n as f64)
    }
}

impl From<&str> for MatrixCell {
    fn from(s: &str) -> Self {
        MatrixCell::Text(s.to_string())
    }
}

/// Games to schedule per unordered pair of teams.
///
/// Pairs are stored by roster position with the earlier-declared team first,
/// so iteration follows combination order (0-1, 0-2, ..., 1-2, ...). Pairs
/// without an entry play 0 games.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchupMatrix {
    team_count: usize,
    counts: BTreeMap<(usize, usize), u32>,
    recovered: Vec<LeagueError>,
}

fn pair_key(a: usize, b: usize) -> (usize, usize) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

impl MatchupMatrix {
    /// Matrix with no games scheduled.
    pub fn empty(roster: &Roster) -> Self {
        MatchupMatrix {
            team_count: roster.len(),
            counts: BTreeMap::new(),
            recovered: Vec::new(),
        }
    }

    /// Every pair plays `games_per_matchup` games.
    pub fn uniform(roster: &Roster, games_per_matchup: u32) -> Self {
        let mut matrix = Self::empty(roster);
        for a in 0..roster.len() {
            for b in (a + 1)..roster.len() {
                matrix.set_count(a, b, games_per_matchup);
            }
        }
        matrix
    }

    /// Read counts from a square table laid out in roster order.
    ///
    /// `cells[row][column]` is the count for the row team against the column
    /// team. The upper triangle is authoritative; an absent upper cell falls
    /// back to its mirror. Diagonal cells are never read. Cells that are
    /// neither numbers nor digit strings count as 0 and are kept as recovered
    /// diagnostics.
    pub fn from_cells(roster: &Roster, cells: &[Vec<MatrixCell>]) -> Self {
        let mut matrix = Self::empty(roster);
        let empty = MatrixCell::Empty;
        let cell = |row: usize, col: usize| {
            cells.get(row).and_then(|r| r.get(col)).unwrap_or(&empty)
        };

        for a in 0..roster.len() {
            for b in (a + 1)..roster.len() {
                let count = match cell(a, b).count() {
                    CellCount::Count(k) => k,
                    CellCount::Malformed => matrix.recover(roster, a, b, cell(a, b)),
                    CellCount::Absent => match cell(b, a).count() {
                        CellCount::Count(k) => k,
                        CellCount::Malformed => matrix.recover(roster, b, a, cell(b, a)),
                        CellCount::Absent => 0,
                    },
                };
                matrix.set_count(a, b, count);
            }
        }

        matrix
    }

    fn recover(&mut self, roster: &Roster, row: usize, col: usize, cell: &MatrixCell) -> u32 {
        let name = |i: usize| roster.get(i).map(|t| t.name.clone()).unwrap_or_default();
        let err = LeagueError::MalformedMatrixEntry {
            row: name(row),
            column: name(col),
            value: cell.describe(),
        };
        warn!("{}", err);
        self.recovered.push(err);
        0
    }

    /// Set the count for a pair; order of the two teams doesn't matter.
    pub fn set_count(&mut self, a: usize, b: usize, count: u32) {
        if a == b || a >= self.team_count || b >= self.team_count {
            return;
        }
        if count == 0 {
            self.counts.remove(&pair_key(a, b));
        } else {
            self.counts.insert(pair_key(a, b), count);
        }
    }

    /// Games between two teams, in either order.
    pub fn count(&self, a: usize, b: usize) -> u32 {
        self.counts.get(&pair_key(a, b)).copied().unwrap_or(0)
    }

    /// Pairs with at least one game, in combination order.
    pub fn pairs(&self) -> impl Iterator<Item = ((usize, usize), u32)> + '_ {
        self.counts.iter().map(|(&pair, &count)| (pair, count))
    }

    pub fn total_games(&self) -> usize {
        self.counts.values().map(|&c| c as usize).sum()
    }

    pub fn team_count(&self) -> usize {
        self.team_count
    }

    /// Malformed cells that were read as 0.
    pub fn recovered(&self) -> &[LeagueError] {
        &self.recovered
    }

    /// Lay the counts out as a full square table, mirrored on both sides of
    /// the diagonal, with the diagonal marker on self-pairs.
    pub fn to_cells(&self) -> Vec<Vec<MatrixCell>> {
        (0..self.team_count)
            .map(|row| {
                (0..self.team_count)
                    .map(|col| {
                        if row == col {
                            MatrixCell::from(DIAGONAL_MARKER)
                        } else {
                            MatrixCell::from(self.count(row, col))
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

/// Read a team list and its matchup table together.
///
/// Fails only when the team list itself is unusable.
pub fn read_matrix<S: AsRef<str>>(
    teams: &[S],
    cells: &[Vec<MatrixCell>],
) -> LeagueResult<(Roster, MatchupMatrix)> {
    let roster = Roster::new(teams)?;
    let matrix = MatchupMatrix::from_cells(&roster, cells);
    Ok((roster, matrix))
}
