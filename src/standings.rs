use serde::Serialize;

use crate::results::TeamRecord;
use crate::team::{Roster, Team};

/// One line of the standings table.
#[cfg_attr(feature = "python", pyo3::pyclass(get_all))]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StandingsRow {
    /// 1-based, dense
    pub rank: usize,
    pub team: String,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub points_for: u64,
    pub points_against: u64,
    pub point_differential: i64,
    pub tie_break_key: f64,
}

/// Sort key for a team: wins plus `row_index / 10000`.
///
/// Among teams with equal wins the one declared later gets the larger key and
/// ranks higher.
pub fn tie_break_key(wins: u32, team: &Team) -> f64 {
    wins as f64 + team.tie_break_fraction()
}

/// Rank teams by descending tie-break key.
///
/// `totals` is indexed like the roster (as produced by
/// [`crate::results::aggregate`]); the same index picks the team, its key and
/// the record shown on its row. Teams without a record rank with 0-0.
pub fn rank_standings(roster: &Roster, totals: &[TeamRecord]) -> Vec<StandingsRow> {
    let mut keyed: Vec<(usize, f64)> = roster
        .teams()
        .iter()
        .enumerate()
        .map(|(i, team)| {
            let wins = totals.get(i).map_or(0, |r| r.wins);
            (i, tie_break_key(wins, team))
        })
        .collect();
    keyed.sort_by(|a, b| b.1.total_cmp(&a.1));

    keyed
        .into_iter()
        .enumerate()
        .map(|(pos, (i, key))| {
            let team = &roster.teams()[i];
            let record = totals
                .get(i)
                .cloned()
                .unwrap_or_else(|| TeamRecord::new(team.name.clone()));
            StandingsRow {
                rank: pos + 1,
                team: team.name.clone(),
                wins: record.wins,
                losses: record.losses,
                ties: record.ties,
                points_for: record.points_for,
                points_against: record.points_against,
                point_differential: record.point_differential(),
                tie_break_key: key,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::{aggregate, GameResult, WeekResults};

    fn record(team: &str, wins: u32, losses: u32) -> TeamRecord {
        TeamRecord {
            wins,
            losses,
            games_played: wins + losses,
            ..TeamRecord::new(team)
        }
    }

    fn order(rows: &[StandingsRow]) -> Vec<&str> {
        rows.iter().map(|r| r.team.as_str()).collect()
    }

    #[test]
    fn test_later_team_wins_tie() {
        let roster = Roster::new(&["Athena", "Hera", "Zeta"]).unwrap();
        let weeks = vec![
            WeekResults {
                week: 1,
                games: vec![
                    GameResult::played("Athena", 4, "Hera", 2),
                    GameResult::played("Zeta", 5, "Hera", 1),
                    GameResult::played("Athena", 3, "Zeta", 1),
                ],
            },
            WeekResults {
                week: 2,
                games: vec![
                    GameResult::played("Athena", 2, "Hera", 1),
                    GameResult::played("Zeta", 6, "Hera", 0),
                    GameResult::played("Zeta", 4, "Athena", 3),
                ],
            },
        ];
        let agg = aggregate(&roster, &weeks).unwrap();
        let rows = rank_standings(&roster, &agg.totals);

        assert_eq!(order(&rows), vec!["Zeta", "Athena", "Hera"]);
        assert_eq!((rows[0].wins, rows[0].losses), (3, 1));
        assert_eq!((rows[1].wins, rows[1].losses), (3, 1));
        assert_eq!((rows[2].wins, rows[2].losses), (0, 4));

        let tied = Roster::new(&["Athena", "Zeta"]).unwrap();
        let rows = rank_standings(&tied, &[record("Athena", 3, 1), record("Zeta", 3, 1)]);
        assert_eq!(order(&rows), vec!["Zeta", "Athena"]);
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[1].rank, 2);
        assert!((rows[0].tie_break_key - 3.0001).abs() < 1e-12);
        assert!((rows[1].tie_break_key - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_more_wins_beat_row_index() {
        let roster = Roster::new(&["A", "B", "C"]).unwrap();
        let totals = [record("A", 5, 0), record("B", 1, 4), record("C", 1, 1)];
        let rows = rank_standings(&roster, &totals);
        assert_eq!(order(&rows), vec!["A", "C", "B"]);
    }

    #[test]
    fn test_ranks_are_dense() {
        let roster = Roster::new(&["A", "B", "C", "D", "E"]).unwrap();
        let rows = rank_standings(&roster, &[]);
        let ranks: Vec<usize> = rows.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
        // Everyone at zero wins: reverse declaration order
        assert_eq!(order(&rows), vec!["E", "D", "C", "B", "A"]);
        assert!(rows.iter().all(|r| r.wins == 0 && r.losses == 0));
    }

    #[test]
    fn test_row_index_is_explicit() {
        // Stored out of declaration order; the row index still decides the tie
        let roster =
            Roster::from_teams(vec![Team::new("Zeta", 1), Team::new("Athena", 0)]).unwrap();
        let rows = rank_standings(&roster, &[record("Zeta", 2, 0), record("Athena", 2, 0)]);
        assert_eq!(order(&rows), vec!["Zeta", "Athena"]);

        let roster =
            Roster::from_teams(vec![Team::new("Zeta", 0), Team::new("Athena", 1)]).unwrap();
        let rows = rank_standings(&roster, &[record("Zeta", 2, 0), record("Athena", 2, 0)]);
        assert_eq!(order(&rows), vec!["Athena", "Zeta"]);
    }

    #[test]
    fn test_record_follows_team() {
        let roster = Roster::new(&["A", "B"]).unwrap();
        let mut b = record("B", 4, 1);
        b.points_for = 40;
        b.points_against = 25;
        let rows = rank_standings(&roster, &[record("A", 1, 4), b]);
        assert_eq!(rows[0].team, "B");
        assert_eq!(rows[0].point_differential, 15);
        assert_eq!(rows[1].team, "A");
        assert_eq!((rows[1].wins, rows[1].losses), (1, 4));
    }

    #[test]
    fn test_deterministic() {
        let roster = Roster::new(&["A", "B", "C", "D"]).unwrap();
        let totals = vec![
            record("A", 2, 1),
            record("B", 2, 1),
            record("C", 0, 3),
            record("D", 2, 1),
        ];
        assert_eq!(rank_standings(&roster, &totals), rank_standings(&roster, &totals));
    }
}
