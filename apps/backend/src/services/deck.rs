//! Daily deck construction.

use chrono::NaiveDate;
use checkin_core::{select_deck, DeckCandidate, Mastery};

use crate::db::Database;
use crate::error::Result;

/// Build the deck for `date` if it does not exist yet.
///
/// Returns the number of entries created, 0 when the deck already existed or
/// the library is empty.
pub async fn ensure_today_deck(db: &Database, date: NaiveDate) -> Result<usize> {
    let settings = db.get_checkin_settings().await?;

    let inserted = db
        .build_deck_once(date, |phrases| {
            let candidates: Vec<DeckCandidate<_>> = phrases
                .into_iter()
                .map(|p| DeckCandidate {
                    id: p.id,
                    mastery: Mastery::from_value(p.mastery),
                })
                .collect();
            select_deck(&candidates, date, &settings.seed, settings.daily_n)
        })
        .await?;

    if inserted > 0 {
        tracing::info!(
            "Built deck for {} with {} phrases (target {}, seed {:?})",
            date,
            inserted,
            settings.daily_n,
            settings.seed
        );
    }

    Ok(inserted)
}
