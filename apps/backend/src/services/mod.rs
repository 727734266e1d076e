pub mod deck;
pub mod library;
pub mod review;
pub mod sessions;
pub mod stats;
pub mod uploads;

use chrono::{Local, NaiveDate};

/// The server's local calendar date.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Requested date, or today when none was given.
pub fn resolve_date(requested: Option<NaiveDate>) -> NaiveDate {
    requested.unwrap_or_else(local_today)
}
