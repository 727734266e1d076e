//! Review cursors held per session.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::NaiveDate;
use checkin_core::ReviewCursor;

/// Session id used when a request carries none.
pub const DEFAULT_SESSION: &str = "default";

/// In-process cursor store keyed by session id.
///
/// A cursor belongs to one deck date; reading it for another date starts
/// over at 0.
#[derive(Default)]
pub struct SessionStore {
    cursors: Mutex<HashMap<String, (NaiveDate, ReviewCursor)>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current cursor for a session and date.
    pub fn cursor(&self, session: &str, date: NaiveDate) -> ReviewCursor {
        self.with_cursor(session, date, |cursor| *cursor)
    }

    /// Move the cursor forward, clamped to the last card.
    pub fn advance(&self, session: &str, date: NaiveDate, len: usize) -> ReviewCursor {
        self.with_cursor(session, date, |cursor| {
            cursor.advance(len);
            *cursor
        })
    }

    /// Put the cursor back on the first card.
    pub fn reset(&self, session: &str, date: NaiveDate) -> ReviewCursor {
        self.with_cursor(session, date, |cursor| {
            cursor.reset();
            *cursor
        })
    }

    fn with_cursor<T>(
        &self,
        session: &str,
        date: NaiveDate,
        f: impl FnOnce(&mut ReviewCursor) -> T,
    ) -> T {
        // Poisoning leaves the map intact.
        let mut cursors = self
            .cursors
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let entry = cursors
            .entry(session.to_string())
            .or_insert_with(|| (date, ReviewCursor::default()));
        if entry.0 != date {
            *entry = (date, ReviewCursor::default());
        }
        f(&mut entry.1)
    }
}
