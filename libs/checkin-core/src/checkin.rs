//! Daily completion and streak aggregation.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::types::{CheckIn, DeckStatus};

/// Number of days shown in stats and considered for the streak.
pub const STATS_WINDOW_DAYS: u32 = 30;

/// Counts of a day's deck entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckTally {
    pub total: u32,
    pub done: u32,
}

impl DeckTally {
    pub fn from_statuses<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = DeckStatus>,
    {
        statuses.into_iter().fold(Self::default(), |mut tally, status| {
            tally.total += 1;
            if status == DeckStatus::Done {
                tally.done += 1;
            }
            tally
        })
    }

    /// A day is complete when every entry is done. Skipped entries block it,
    /// and an empty deck never counts.
    pub fn is_completed(&self) -> bool {
        self.total > 0 && self.done == self.total
    }

    pub fn to_checkin(&self, date: NaiveDate, target_n: u32) -> CheckIn {
        CheckIn {
            date,
            target_n,
            done_n: self.done,
            completed: self.is_completed(),
        }
    }
}

/// Dates of the stats window, newest first.
pub fn window_days(today: NaiveDate) -> Vec<NaiveDate> {
    (0..STATS_WINDOW_DAYS as i64)
        .map(|offset| today - Duration::days(offset))
        .collect()
}

/// One row per window day, newest first; days without a check-in are zeroed.
pub fn daily_rows(today: NaiveDate, checkins: &[CheckIn]) -> Vec<CheckIn> {
    let by_date: HashMap<NaiveDate, &CheckIn> = checkins.iter().map(|c| (c.date, c)).collect();
    window_days(today)
        .into_iter()
        .map(|date| {
            by_date
                .get(&date)
                .map(|c| (*c).clone())
                .unwrap_or_else(|| CheckIn::missing(date))
        })
        .collect()
}

/// Consecutive completed days ending at `today`.
pub fn streak(today: NaiveDate, checkins: &[CheckIn]) -> u32 {
    daily_rows(today, checkins)
        .iter()
        .take_while(|c| c.completed)
        .count() as u32
}
