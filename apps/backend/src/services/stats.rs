//! Check-in history and streak.

use chrono::{Duration, NaiveDate};
use checkin_core::{daily_rows, streak, CheckIn, STATS_WINDOW_DAYS};

use crate::db::Database;
use crate::error::Result;
use crate::models::StatsResponse;

/// Thirty-day table ending at `today`, newest first, with the current streak.
pub async fn checkin_stats(db: &Database, today: NaiveDate) -> Result<StatsResponse> {
    let start = today - Duration::days(STATS_WINDOW_DAYS as i64 - 1);
    let checkins: Vec<CheckIn> = db
        .get_checkins_between(start, today)
        .await?
        .iter()
        .map(|c| c.to_core())
        .collect();

    Ok(StatsResponse {
        streak: streak(today, &checkins),
        days: daily_rows(today, &checkins),
    })
}
