//! Today's review session: presenting the deck and applying responses.

use chrono::{NaiveDate, Utc};
use checkin_core::{review_order_key, DeckTally, ReviewAction, ReviewCursor};

use crate::db::Database;
use crate::error::{ApiError, Result};
use crate::models::*;
use crate::services::deck::ensure_today_deck;
use crate::services::sessions::SessionStore;

/// Deck cards for a date in presentation order.
pub async fn ordered_cards(db: &Database, date: NaiveDate) -> Result<Vec<DeckCard>> {
    let mut cards: Vec<DeckCard> = db
        .get_deck_cards(date)
        .await?
        .iter()
        .map(|c| c.to_api_card())
        .collect();
    cards.sort_by_key(|c| review_order_key(c.status, c.position));
    Ok(cards)
}

/// Assemble the response for a day's deck as seen from one cursor.
pub fn assemble_today(
    date: NaiveDate,
    target_n: u32,
    cards: Vec<DeckCard>,
    cursor: ReviewCursor,
) -> TodayResponse {
    let tally = DeckTally::from_statuses(cards.iter().map(|c| c.status));
    let current_index = cursor.current(cards.len());

    TodayResponse {
        date,
        target_n,
        deck_size: cards.len(),
        done_n: tally.done,
        completed: tally.is_completed(),
        cursor: current_index,
        current: current_index.and_then(|i| cards.get(i).cloned()),
        cards,
    }
}

/// Ensure the deck, refresh the check-in and return the session's view.
pub async fn today_view(
    db: &Database,
    sessions: &SessionStore,
    session: &str,
    date: NaiveDate,
) -> Result<TodayResponse> {
    ensure_today_deck(db, date).await?;
    let settings = db.get_checkin_settings().await?;
    let cards = ordered_cards(db, date).await?;

    if !cards.is_empty() {
        db.refresh_checkin(date, settings.daily_n).await?;
    }

    Ok(assemble_today(
        date,
        settings.daily_n,
        cards,
        sessions.cursor(session, date),
    ))
}

/// Apply a response to the card under the session's cursor, then advance.
pub async fn apply_action(
    db: &Database,
    sessions: &SessionStore,
    session: &str,
    date: NaiveDate,
    action: ReviewAction,
) -> Result<TodayResponse> {
    ensure_today_deck(db, date).await?;
    let settings = db.get_checkin_settings().await?;
    let cards = ordered_cards(db, date).await?;

    let index = sessions
        .cursor(session, date)
        .current(cards.len())
        .ok_or_else(|| ApiError::NotFound(format!("No deck for {}", date)))?;
    let card = &cards[index];

    let checkin = db
        .record_review(date, card.phrase_id, action, settings.daily_n, Utc::now())
        .await?;
    sessions.advance(session, date, cards.len());

    tracing::debug!(
        "Session {} marked {} as {:?} ({}/{} done)",
        session,
        card.phrase_id,
        action,
        checkin.done_n,
        cards.len()
    );

    let cards = ordered_cards(db, date).await?;
    Ok(assemble_today(
        date,
        settings.daily_n,
        cards,
        sessions.cursor(session, date),
    ))
}

/// Move the session's cursor back to the first card.
pub async fn reset_cursor(
    db: &Database,
    sessions: &SessionStore,
    session: &str,
    date: NaiveDate,
) -> Result<TodayResponse> {
    sessions.reset(session, date);
    today_view(db, sessions, session, date).await
}
