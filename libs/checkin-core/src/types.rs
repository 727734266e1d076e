//! Core types for the phrase check-in application.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Per-phrase mastery level.
///
/// Stored as an integer: 0 = unseen, 1 = learning, 2 = known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mastery {
    Unseen,
    Learning,
    Known,
}

impl Default for Mastery {
    fn default() -> Self {
        Self::Unseen
    }
}

impl Mastery {
    /// Convert to the stored numeric value (0-2).
    pub fn to_value(self) -> i32 {
        match self {
            Self::Unseen => 0,
            Self::Learning => 1,
            Self::Known => 2,
        }
    }

    /// Create from the stored numeric value.
    ///
    /// Out-of-range values saturate: anything below 1 is unseen, anything
    /// above 1 is known.
    pub fn from_value(value: i32) -> Self {
        match value {
            i32::MIN..=0 => Self::Unseen,
            1 => Self::Learning,
            _ => Self::Known,
        }
    }
}

/// Status of a deck entry for a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeckStatus {
    Pending,
    Done,
    Skipped,
}

impl Default for DeckStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl DeckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Done => "done",
            Self::Skipped => "skipped",
        }
    }

    /// Parse from the stored string. Unknown values read as pending.
    pub fn from_str(s: &str) -> Self {
        match s {
            "done" => Self::Done,
            "skipped" => Self::Skipped,
            _ => Self::Pending,
        }
    }

    /// Presentation rank, ascending by stored status: done, pending, skipped.
    ///
    /// Known and unknown responses move a card to the front, so advancing
    /// lands on the next pending card. A skip moves the card to the back and
    /// the advance steps over one pending card, which comes round later.
    pub fn sort_rank(&self) -> u8 {
        match self {
            Self::Done => 0,
            Self::Pending => 1,
            Self::Skipped => 2,
        }
    }
}

/// Result recorded on a deck entry that reached `done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewResult {
    Known,
    Unknown,
}

impl ReviewResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Known => "known",
            Self::Unknown => "unknown",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "known" => Some(Self::Known),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }
}

/// Learning progress of a single phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProgressState {
    pub mastery: Mastery,
    pub seen_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<DateTime<Utc>>,
}

/// Daily check-in summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckIn {
    pub date: NaiveDate,
    pub target_n: u32,
    pub done_n: u32,
    pub completed: bool,
}

impl CheckIn {
    /// Placeholder for a day without any recorded check-in.
    pub fn missing(date: NaiveDate) -> Self {
        Self {
            date,
            target_n: 0,
            done_n: 0,
            completed: false,
        }
    }
}
