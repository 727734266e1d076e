//! Settings keys, defaults and clamping rules.

use serde::{Deserialize, Serialize};

pub const DAILY_N_KEY: &str = "daily_n";
pub const SEED_KEY: &str = "seed";

pub const DEFAULT_DAILY_N: u32 = 15;
pub const MIN_DAILY_N: u32 = 10;
pub const MAX_DAILY_N: u32 = 30;
pub const DEFAULT_SEED: &str = "42";

/// Hardcoded fallback for a settings key, if it has one.
pub fn default_value(key: &str) -> Option<&'static str> {
    match key {
        DAILY_N_KEY => Some("15"),
        SEED_KEY => Some(DEFAULT_SEED),
        _ => None,
    }
}

/// Clamp a daily target into `[MIN_DAILY_N, MAX_DAILY_N]`.
pub fn clamp_daily_n(n: i64) -> u32 {
    n.clamp(MIN_DAILY_N as i64, MAX_DAILY_N as i64) as u32
}

/// Parse a stored daily target. Unparseable values fall back to the default.
pub fn parse_daily_n(raw: &str) -> u32 {
    let n = raw.trim().parse::<i64>().unwrap_or(DEFAULT_DAILY_N as i64);
    clamp_daily_n(n)
}

/// Trim a seed string, replacing a blank one with the default.
pub fn normalize_seed(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        DEFAULT_SEED.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Effective settings used by the deck builder and check-in aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckinSettings {
    pub daily_n: u32,
    pub seed: String,
}

impl Default for CheckinSettings {
    fn default() -> Self {
        Self {
            daily_n: DEFAULT_DAILY_N,
            seed: DEFAULT_SEED.to_string(),
        }
    }
}

impl CheckinSettings {
    /// Build from raw stored values (already defaulted when absent).
    pub fn from_raw(daily_n: &str, seed: &str) -> Self {
        Self {
            daily_n: parse_daily_n(daily_n),
            seed: normalize_seed(seed),
        }
    }
}
