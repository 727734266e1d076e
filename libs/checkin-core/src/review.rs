//! Review session transitions: what each response does to a deck entry, to a
//! phrase's progress, and to the session cursor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{DeckStatus, Mastery, ProgressState, ReviewResult};

/// A user's response to the card under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewAction {
    Known,
    Unknown,
    Skip,
}

impl ReviewAction {
    /// New status and result for the reviewed deck entry.
    pub fn deck_update(self) -> (DeckStatus, Option<ReviewResult>) {
        match self {
            Self::Known => (DeckStatus::Done, Some(ReviewResult::Known)),
            Self::Unknown => (DeckStatus::Done, Some(ReviewResult::Unknown)),
            Self::Skip => (DeckStatus::Skipped, None),
        }
    }
}

impl ProgressState {
    /// Progress after a phrase is marked known or unknown.
    ///
    /// Mastery never decreases: known forces 2, unknown lifts unseen to 1.
    pub fn after_review(&self, result: ReviewResult, now: DateTime<Utc>) -> Self {
        let mastery = match result {
            ReviewResult::Known => Mastery::Known,
            ReviewResult::Unknown => self.mastery.max(Mastery::Learning),
        };
        Self {
            mastery,
            seen_count: self.seen_count.saturating_add(1),
            last_seen: Some(now),
        }
    }
}

/// Sort key for presenting a day's deck: done, then pending, then skipped,
/// each group in selection order.
pub fn review_order_key(status: DeckStatus, position: i32) -> (u8, i32) {
    (status.sort_rank(), position)
}

/// Position of a review session within today's deck.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewCursor {
    index: usize,
}

impl ReviewCursor {
    pub fn new(index: usize) -> Self {
        Self { index }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Index to display for a deck of `len` cards, or `None` for an empty deck.
    pub fn current(&self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else {
            Some(self.index.min(len - 1))
        }
    }

    /// Move to the next card, stopping at the last one.
    pub fn advance(&mut self, len: usize) {
        self.index = match self.current(len) {
            Some(current) => (current + 1).min(len - 1),
            None => 0,
        };
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }
}
