use chrono::{Datelike, Duration, NaiveDate};
use log::debug;
use serde::Serialize;

use crate::constants::DAYS_PER_WEEK;
use crate::error::{LeagueError, LeagueResult};
use crate::results::TeamRecord;
use crate::schedule::{Game, Schedule};

/// The games played in one week, in schedule order.
#[cfg_attr(feature = "python", pyo3::pyclass(get_all))]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WeekBucket {
    /// 1-based week number
    pub week: usize,
    pub games: Vec<Game>,
}

impl WeekBucket {
    pub fn empty(week: usize) -> Self {
        WeekBucket {
            week,
            games: Vec::new(),
        }
    }
}

/// Games each week gets before the last one: `ceil(total / num_weeks)`.
pub fn games_per_week(total: usize, num_weeks: usize) -> usize {
    if num_weeks == 0 {
        return 0;
    }
    total.div_ceil(num_weeks)
}

/// Split a schedule into `num_weeks` contiguous buckets.
///
/// Game `i` (0-based) lands in week `min(i / per_week, num_weeks - 1)`. The
/// last week takes whatever is left, so it may be short or empty.
pub fn distribute(schedule: &Schedule, num_weeks: usize) -> LeagueResult<Vec<WeekBucket>> {
    if num_weeks == 0 {
        return Err(LeagueError::Configuration("number of weeks must be at least 1".to_string()));
    }

    let mut buckets: Vec<WeekBucket> = (1..=num_weeks).map(WeekBucket::empty).collect();
    let per_week = games_per_week(schedule.len(), num_weeks);
    if per_week == 0 {
        return Ok(buckets);
    }

    for (i, game) in schedule.games().iter().enumerate() {
        let week = (i / per_week).min(num_weeks - 1);
        buckets[week].games.push(game.clone());
    }

    debug!(
        "distributed {} games over {} weeks ({} per week)",
        schedule.len(),
        num_weeks,
        per_week
    );
    Ok(buckets)
}

/// `Week N (M.D)` counted from `start_date`, or plain `Week N` without one.
pub fn week_label(week: usize, start_date: Option<NaiveDate>) -> String {
    match start_date {
        Some(start) => {
            let date = start + Duration::days(DAYS_PER_WEEK * (week as i64 - 1));
            format!("Week {} ({}.{})", week, date.month(), date.day())
        }
        None => format!("Week {}", week),
    }
}

pub fn week_labels(num_weeks: usize, start_date: Option<NaiveDate>) -> Vec<String> {
    (1..=num_weeks).map(|week| week_label(week, start_date)).collect()
}

/// First Sunday strictly after `today`.
pub fn next_sunday(today: NaiveDate) -> NaiveDate {
    let days = (6 - today.weekday().num_days_from_monday() as i64) % 7;
    let days = if days == 0 { DAYS_PER_WEEK } else { days };
    today + Duration::days(days)
}

/// A week as the host persists it: the game list plus a separate win/loss
/// display region.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct WeekSheet {
    pub week: usize,
    pub label: String,
    pub games: Vec<Game>,
    pub tally: Vec<TeamRecord>,
}

/// Write buckets into existing week sheets.
///
/// Only the game list of a matching sheet is replaced; its tally region is
/// kept. Weeks without a sheet get a new one with an empty tally. Sheets for
/// weeks beyond the buckets are left as they are.
pub fn apply_to_sheets(
    sheets: &mut Vec<WeekSheet>,
    buckets: &[WeekBucket],
    start_date: Option<NaiveDate>,
) {
    for bucket in buckets {
        match sheets.iter_mut().find(|s| s.week == bucket.week) {
            Some(sheet) => sheet.games = bucket.games.clone(),
            None => sheets.push(WeekSheet {
                week: bucket.week,
                label: week_label(bucket.week, start_date),
                games: bucket.games.clone(),
                tally: Vec::new(),
            }),
        }
    }
    sheets.sort_by_key(|s| s.week);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::MatchupMatrix;
    use crate::schedule::{generate_schedule, PairingOrder};
    use crate::team::Roster;
    use proptest::prelude::*;

    fn numbered(total: usize) -> Schedule {
        Schedule::from_games((1..=total).map(|id| Game::new(id, "H", "A")).collect())
    }

    fn sizes(buckets: &[WeekBucket]) -> Vec<usize> {
        buckets.iter().map(|b| b.games.len()).collect()
    }

    #[test]
    fn test_six_games_four_weeks() {
        let roster = Roster::new(&["A", "B", "C"]).unwrap();
        let matrix = MatchupMatrix::uniform(&roster, 2);
        let schedule = generate_schedule(&roster, &matrix, PairingOrder::Consecutive);
        assert_eq!(games_per_week(schedule.len(), 4), 2);

        let buckets = distribute(&schedule, 4).unwrap();
        assert_eq!(sizes(&buckets), vec![2, 2, 2, 0]);
        let weeks: Vec<usize> = buckets.iter().map(|b| b.week).collect();
        assert_eq!(weeks, vec![1, 2, 3, 4]);
        assert_eq!(buckets[2].games[0].id, 5);
    }

    #[test]
    fn test_short_last_week() {
        let buckets = distribute(&numbered(7), 3).unwrap();
        assert_eq!(sizes(&buckets), vec![3, 3, 1]);
    }

    #[test]
    fn test_fewer_games_than_weeks() {
        let buckets = distribute(&numbered(2), 5).unwrap();
        assert_eq!(sizes(&buckets), vec![1, 1, 0, 0, 0]);
    }

    #[test]
    fn test_single_week_takes_everything() {
        let buckets = distribute(&numbered(9), 1).unwrap();
        assert_eq!(sizes(&buckets), vec![9]);
    }

    #[test]
    fn test_empty_schedule() {
        let buckets = distribute(&Schedule::default(), 3).unwrap();
        assert_eq!(sizes(&buckets), vec![0, 0, 0]);
    }

    #[test]
    fn test_zero_weeks_rejected() {
        let err = distribute(&numbered(4), 0).unwrap_err();
        assert!(matches!(err, LeagueError::Configuration(_)));
    }

    #[test]
    fn test_week_labels() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 4).unwrap();
        assert_eq!(
            week_labels(3, Some(start)),
            vec!["Week 1 (1.4)", "Week 2 (1.11)", "Week 3 (1.18)"]
        );
        assert_eq!(week_labels(2, None), vec!["Week 1", "Week 2"]);
        assert_eq!(week_label(5, NaiveDate::from_ymd_opt(2025, 12, 28)), "Week 5 (1.25)");
    }

    #[test]
    fn test_next_sunday() {
        // 2026-10-19 is a Monday
        let monday = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(next_sunday(monday), NaiveDate::from_ymd_opt(2026, 10, 25).unwrap());

        let saturday = NaiveDate::from_ymd_opt(2026, 10, 24).unwrap();
        assert_eq!(next_sunday(saturday), NaiveDate::from_ymd_opt(2026, 10, 25).unwrap());

        let sunday = NaiveDate::from_ymd_opt(2026, 10, 25).unwrap();
        assert_eq!(next_sunday(sunday), NaiveDate::from_ymd_opt(2026, 11, 1).unwrap());
    }

    #[test]
    fn test_apply_keeps_tally_region() {
        let tally = vec![TeamRecord::new("Athena")];
        let mut sheets = vec![WeekSheet {
            week: 2,
            label: "Week 2 (1.11)".to_string(),
            games: vec![Game::new(99, "Old", "Game")],
            tally: tally.clone(),
        }];

        let buckets = distribute(&numbered(4), 2).unwrap();
        apply_to_sheets(&mut sheets, &buckets, None);

        assert_eq!(sheets.len(), 2);
        assert_eq!(sheets[0].week, 1);
        assert_eq!(sheets[0].label, "Week 1");
        assert!(sheets[0].tally.is_empty());

        assert_eq!(sheets[1].label, "Week 2 (1.11)");
        assert_eq!(sheets[1].games, buckets[1].games);
        assert_eq!(sheets[1].tally, tally);
    }

    proptest! {
        #[test]
        fn prop_buckets_partition_schedule(total in 0usize..200, num_weeks in 1usize..20) {
            let schedule = numbered(total);
            let buckets = distribute(&schedule, num_weeks).unwrap();
            prop_assert_eq!(buckets.len(), num_weeks);

            let flat: Vec<Game> = buckets.iter().flat_map(|b| b.games.clone()).collect();
            prop_assert_eq!(flat.as_slice(), schedule.games());

            let per_week = games_per_week(total, num_weeks);
            for bucket in &buckets[..num_weeks - 1] {
                prop_assert!(bucket.games.len() <= per_week);
            }
            // Once a week comes up short, every later week is empty
            let first_short = buckets.iter().position(|b| b.games.len() < per_week);
            if let Some(short) = first_short {
                for bucket in &buckets[short + 1..] {
                    prop_assert!(bucket.games.is_empty());
                }
            }
        }
    }
}
