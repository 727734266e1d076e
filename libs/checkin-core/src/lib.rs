//! Core library for the phrase check-in application.
//!
//! Provides:
//! - Deterministic daily deck selection stratified by mastery
//! - Review transitions (deck status, progress, session cursor)
//! - Check-in completion and streak aggregation
//! - CSV phrase table reader
//! - Settings defaults and clamping

pub mod checkin;
pub mod deck;
pub mod error;
pub mod import;
pub mod review;
pub mod settings;
pub mod types;

pub use checkin::{daily_rows, streak, window_days, DeckTally, STATS_WINDOW_DAYS};
pub use deck::{seed_for_day, select_deck, DeckCandidate};
pub use error::{ImportError, Result};
pub use import::{parse_phrases, read_table, ParsedImport, PhraseRow, Table};
pub use review::{review_order_key, ReviewAction, ReviewCursor};
pub use settings::CheckinSettings;
pub use types::{CheckIn, DeckStatus, Mastery, ProgressState, ReviewResult};
