//! Test fixtures and factory functions for creating test data.

use chrono::NaiveDate;

/// Fixed date used by tests that pin `?date=`.
pub fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid fixture date")
}

/// Generate a phrase CSV with the given number of rows.
pub fn phrase_csv(scene: &str, rows: usize) -> String {
    let mut csv = String::from("scene,en,zh,tags,level\n");
    for i in 0..rows {
        csv.push_str(&format!(
            "{},Could I get item {}?,我能要第{}个吗,ordering,A2\n",
            scene,
            i + 1,
            i + 1
        ));
    }
    csv
}

/// CSV with only the required columns and some padding to trim.
pub fn minimal_csv() -> &'static str {
    "scene,en\n  cafe  ,  A latte please.  \ncafe,\nairport,Where is gate 5?\n"
}

/// CSV lacking the `en` column.
pub fn missing_en_csv() -> &'static str {
    "scene,zh\ncafe,拿铁\n"
}
