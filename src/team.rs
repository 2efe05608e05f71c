use std::collections::HashSet;

use crate::constants::{MIN_TEAMS, TIE_BREAK_DIVISOR};
use crate::error::{LeagueError, LeagueResult};

/// How a team's name is recognized in recorded results.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum TeamMatch {
    /// The record must carry the team name verbatim
    #[default]
    Exact,
    /// Any record starting with the base matches, e.g. `"Athena "` for base `"Athena"`
    PrefixOf(String),
}

/// A declared team.
///
/// The row index is fixed when the team list is first established and is what
/// the standings tie-break is computed from, independent of where the team
/// happens to sit in a collection later on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Team {
    pub name: String,

    /// 0-based position in the declared team list
    pub row_index: usize,

    pub matching: TeamMatch,
}

impl Team {
    pub fn new(name: impl Into<String>, row_index: usize) -> Self {
        Team {
            name: name.into(),
            row_index,
            matching: TeamMatch::Exact,
        }
    }

    /// Match this team by prefix instead of by exact name.
    pub fn with_prefix(mut self, base: impl Into<String>) -> Self {
        self.matching = TeamMatch::PrefixOf(base.into());
        self
    }

    /// Fractional part of the standings key; grows with the row index.
    pub fn tie_break_fraction(&self) -> f64 {
        self.row_index as f64 / TIE_BREAK_DIVISOR
    }
}

/// Validated, ordered list of teams.
///
/// Declaration order drives pairing order in the generator; row indices drive
/// the standings tie-break.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Roster {
    teams: Vec<Team>,
}

impl Roster {
    /// Build a roster from names, assigning row indices by position.
    pub fn new<S: AsRef<str>>(names: &[S]) -> LeagueResult<Self> {
        let teams = names
            .iter()
            .enumerate()
            .map(|(i, name)| Team::new(name.as_ref().trim(), i))
            .collect();
        Self::from_teams(teams)
    }

    /// Build a roster from teams that already carry their row index.
    pub fn from_teams(teams: Vec<Team>) -> LeagueResult<Self> {
        if teams.len() < MIN_TEAMS {
            return Err(LeagueError::Configuration(format!(
                "need at least {} teams, found {}",
                MIN_TEAMS,
                teams.len()
            )));
        }
        if teams.len() as f64 >= TIE_BREAK_DIVISOR {
            return Err(LeagueError::Configuration(format!(
                "too many teams ({}) for the standings tie-break",
                teams.len()
            )));
        }

        let mut names = HashSet::new();
        let mut rows = HashSet::new();
        let mut bases = HashSet::new();
        for team in &teams {
            if team.name.is_empty() {
                return Err(LeagueError::Configuration("team names must not be empty".to_string()));
            }
            if !names.insert(team.name.as_str()) {
                return Err(LeagueError::Configuration(format!("duplicate team {:?}", team.name)));
            }
            if team.row_index as f64 >= TIE_BREAK_DIVISOR {
                return Err(LeagueError::Configuration(format!(
                    "row index {} of {:?} is too large for the standings tie-break",
                    team.row_index, team.name
                )));
            }
            if !rows.insert(team.row_index) {
                return Err(LeagueError::Configuration(format!(
                    "duplicate row index {} ({:?})",
                    team.row_index, team.name
                )));
            }
            if let TeamMatch::PrefixOf(base) = &team.matching {
                if base.is_empty() {
                    return Err(LeagueError::Configuration(format!(
                        "empty match prefix for {:?}",
                        team.name
                    )));
                }
                if !bases.insert(base.as_str()) {
                    return Err(LeagueError::Configuration(format!(
                        "match prefix {:?} is used by more than one team",
                        base
                    )));
                }
                // Rows for the other team would be credited to this one
                if let Some(other) = teams
                    .iter()
                    .find(|other| other.name != team.name && other.name.starts_with(base.as_str()))
                {
                    return Err(LeagueError::Configuration(format!(
                        "match prefix {:?} of {:?} also matches team {:?}",
                        base, team.name, other.name
                    )));
                }
            }
        }

        Ok(Roster { teams })
    }

    /// Switch one team to prefix matching.
    pub fn with_prefix_match(self, team: &str, base: &str) -> LeagueResult<Self> {
        let mut teams = self.teams;
        let index = teams.iter().position(|t| t.name == team).ok_or_else(|| {
            LeagueError::Configuration(format!("cannot prefix-match unknown team {:?}", team))
        })?;
        teams[index] = teams[index].clone().with_prefix(base);
        Self::from_teams(teams)
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn get(&self, index: usize) -> Option<&Team> {
        self.teams.get(index)
    }

    pub fn names(&self) -> Vec<String> {
        self.teams.iter().map(|t| t.name.clone()).collect()
    }

    /// Position of the team with exactly this name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.teams.iter().position(|t| t.name == name)
    }

    /// Resolve a name from a result record to a single team.
    ///
    /// An exact name wins. Otherwise the prefix-matched team with the longest
    /// base the record starts with is chosen, so a record never resolves to
    /// two teams.
    pub fn resolve(&self, name: &str) -> Option<usize> {
        if let Some(i) = self.index_of(name) {
            return Some(i);
        }

        self.teams
            .iter()
            .enumerate()
            .filter_map(|(i, team)| match &team.matching {
                TeamMatch::PrefixOf(base) if name.starts_with(base.as_str()) => {
                    Some((i, base.len()))
                }
                _ => None,
            })
            .max_by_key(|&(_, len)| len)
            .map(|(i, _)| i)
    }
}
