//! Schedule statistics for reviewing a generated schedule before it is
//! published.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::schedule::Game;
use crate::team::Roster;
use crate::weeks::WeekBucket;

/// Meetings with a single opponent.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize)]
pub struct MatchupDetail {
    pub total: u32,
    pub home: u32,
    pub away: u32,
}

/// How a team's schedule breaks down.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TeamScheduleStats {
    pub team: String,
    pub games: u32,
    pub home_games: u32,
    pub away_games: u32,
    /// Keyed by opponent name
    pub matchups: BTreeMap<String, MatchupDetail>,
}

impl TeamScheduleStats {
    fn new(team: impl Into<String>) -> Self {
        TeamScheduleStats {
            team: team.into(),
            games: 0,
            home_games: 0,
            away_games: 0,
            matchups: BTreeMap::new(),
        }
    }
}

/// Per-team counts over a list of games, in roster order.
///
/// Games naming a team that isn't on the roster are left out.
pub fn team_schedule_stats(roster: &Roster, games: &[Game]) -> Vec<TeamScheduleStats> {
    let mut stats: Vec<TeamScheduleStats> = roster
        .teams()
        .iter()
        .map(|t| TeamScheduleStats::new(t.name.clone()))
        .collect();

    for game in games {
        let (Some(home), Some(away)) = (roster.resolve(&game.home), roster.resolve(&game.away))
        else {
            continue;
        };
        let home_name = stats[home].team.clone();
        let away_name = stats[away].team.clone();

        let entry = &mut stats[home];
        entry.games += 1;
        entry.home_games += 1;
        let detail = entry.matchups.entry(away_name).or_default();
        detail.total += 1;
        detail.home += 1;

        let entry = &mut stats[away];
        entry.games += 1;
        entry.away_games += 1;
        let detail = entry.matchups.entry(home_name).or_default();
        detail.total += 1;
        detail.away += 1;
    }

    stats
}

/// Declared teams with no game in the given week.
pub fn teams_off(roster: &Roster, bucket: &WeekBucket) -> Vec<String> {
    roster
        .teams()
        .iter()
        .filter(|t| !bucket.games.iter().any(|g| g.involves(&t.name)))
        .map(|t| t.name.clone())
        .collect()
}

/// Two teams meeting more than once in the same week.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RepeatedPairing {
    pub week: usize,
    /// As written on the first meeting of the week
    pub home: String,
    pub away: String,
    pub meetings: u32,
}

/// Every pair that meets more than once within a week, in order of first
/// meeting. Home and away are not distinguished.
pub fn repeated_pairings(buckets: &[WeekBucket]) -> Vec<RepeatedPairing> {
    let mut repeats = Vec::new();

    for bucket in buckets {
        let mut seen: Vec<(&str, &str, u32)> = Vec::new();
        for game in &bucket.games {
            let existing = seen.iter_mut().find(|(h, a, _)| {
                (*h == game.home && *a == game.away) || (*h == game.away && *a == game.home)
            });
            match existing {
                Some((_, _, meetings)) => *meetings += 1,
                None => seen.push((game.home.as_str(), game.away.as_str(), 1)),
            }
        }

        repeats.extend(
            seen.into_iter()
                .filter(|&(_, _, meetings)| meetings > 1)
                .map(|(home, away, meetings)| RepeatedPairing {
                    week: bucket.week,
                    home: home.to_string(),
                    away: away.to_string(),
                    meetings,
                }),
        );
    }

    repeats
}
