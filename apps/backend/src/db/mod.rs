//! PostgreSQL database operations

pub mod schema;

use chrono::{DateTime, NaiveDate, Utc};
use checkin_core::settings::{default_value, DAILY_N_KEY, SEED_KEY};
use checkin_core::{DeckTally, PhraseRow, ReviewAction};
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    PgConnection, PgPool,
};
use uuid::Uuid;

use crate::config::DatabaseConfig;
use crate::error::{ApiError, Result};
use crate::models::*;

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect using resolved environment configuration
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        Self::connect_with(config.connect_options()?).await
    }

    /// Connect to PostgreSQL and create connection pool
    pub async fn connect_with(options: PgConnectOptions) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create tables and indexes if they do not exist yet
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::raw_sql(schema::SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === Settings Repository ===

    /// Get a setting, falling back to its hardcoded default
    pub async fn get_setting(&self, key: &str) -> Result<String> {
        let value: Option<Option<String>> =
            sqlx::query_scalar("SELECT value FROM settings WHERE key = $1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(value
            .flatten()
            .or_else(|| default_value(key).map(String::from))
            .unwrap_or_default())
    }

    /// Upsert a setting
    pub async fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO settings (key, value)
            VALUES ($1, $2)
            ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get the deck settings with defaults and clamping applied
    pub async fn get_checkin_settings(&self) -> Result<CheckinSettings> {
        let daily_n = self.get_setting(DAILY_N_KEY).await?;
        let seed = self.get_setting(SEED_KEY).await?;
        Ok(CheckinSettings::from_raw(&daily_n, &seed))
    }

    // === Phrase Repository ===

    /// Insert phrases, skipping (scene, en) pairs that already exist.
    /// Returns the number of newly inserted rows.
    pub async fn insert_phrases(&self, rows: &[PhraseRow]) -> Result<usize> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for row in rows {
            let result = sqlx::query(
                r#"
                INSERT INTO phrases (id, scene, en, zh, tags, level)
                VALUES ($1, $2, $3, $4, $5, $6)
                ON CONFLICT (scene, en) DO NOTHING
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(&row.scene)
            .bind(&row.en)
            .bind(&row.zh)
            .bind(&row.tags)
            .bind(&row.level)
            .execute(&mut *tx)
            .await?;

            inserted += result.rows_affected() as usize;
        }

        tx.commit().await?;
        Ok(inserted)
    }

    /// Search the library by scene and keyword, newest first
    pub async fn search_phrases(
        &self,
        scene: Option<&str>,
        keyword: Option<&str>,
        limit: i64,
    ) -> Result<Vec<DbPhrase>> {
        let scene = scene.map(like_pattern);
        let keyword = keyword.map(like_pattern);

        let phrases = sqlx::query_as::<_, DbPhrase>(
            r#"
            SELECT id, scene, en, zh, tags, level, created_at
            FROM phrases
            WHERE ($1::TEXT IS NULL OR scene ILIKE $1)
              AND ($2::TEXT IS NULL OR en ILIKE $2 OR zh ILIKE $2 OR tags ILIKE $2)
            ORDER BY created_at DESC, id
            LIMIT $3
            "#,
        )
        .bind(scene)
        .bind(keyword)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(phrases)
    }

    // === Progress Repository ===

    /// Get progress for a phrase
    pub async fn get_progress(&self, phrase_id: Uuid) -> Result<Option<DbProgress>> {
        let progress = sqlx::query_as::<_, DbProgress>(
            r#"
            SELECT phrase_id, mastery, last_seen, seen_count
            FROM progress
            WHERE phrase_id = $1
            "#,
        )
        .bind(phrase_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(progress)
    }

    // === Deck Repository ===

    /// Build the deck for a date unless one already exists.
    ///
    /// `select` receives every phrase with its mastery (phrases never reviewed
    /// read as unseen) and returns the ordered ids to insert. The existence
    /// check, the read and the inserts share one transaction. Returns the
    /// number of entries inserted.
    pub async fn build_deck_once<F>(&self, date: NaiveDate, select: F) -> Result<usize>
    where
        F: FnOnce(Vec<PhraseMastery>) -> Vec<Uuid>,
    {
        let mut tx = self.pool.begin().await?;

        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM decks WHERE deck_date = $1")
            .bind(date)
            .fetch_one(&mut *tx)
            .await?;
        if existing > 0 {
            return Ok(0);
        }

        let candidates = sqlx::query_as::<_, PhraseMastery>(
            r#"
            SELECT p.id, COALESCE(pr.mastery, 0) AS mastery
            FROM phrases p
            LEFT JOIN progress pr ON pr.phrase_id = p.id
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;

        let mut inserted = 0;
        for (position, phrase_id) in select(candidates).iter().enumerate() {
            let result = sqlx::query(
                r#"
                INSERT INTO decks (deck_date, phrase_id, position, status)
                VALUES ($1, $2, $3, 'pending')
                ON CONFLICT (deck_date, phrase_id) DO NOTHING
                "#,
            )
            .bind(date)
            .bind(phrase_id)
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;

            inserted += result.rows_affected() as usize;
        }

        tx.commit().await?;
        Ok(inserted)
    }

    /// Deck entries for a date joined with their phrases, in selection order
    pub async fn get_deck_cards(&self, date: NaiveDate) -> Result<Vec<DbDeckCard>> {
        let cards = sqlx::query_as::<_, DbDeckCard>(
            r#"
            SELECT d.phrase_id, d.position, d.status, d.result, p.scene, p.en, p.zh
            FROM decks d
            JOIN phrases p ON p.id = d.phrase_id
            WHERE d.deck_date = $1
            ORDER BY d.position, d.phrase_id
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(cards)
    }

    /// Apply a review action to one deck entry.
    ///
    /// Updates the entry, upserts progress for known/unknown, and recomputes
    /// the day's check-in, all in one transaction.
    pub async fn record_review(
        &self,
        date: NaiveDate,
        phrase_id: Uuid,
        action: ReviewAction,
        target_n: u32,
        now: DateTime<Utc>,
    ) -> Result<CheckIn> {
        let mut tx = self.pool.begin().await?;
        let (status, result) = action.deck_update();

        let updated = sqlx::query(
            r#"
            UPDATE decks
            SET status = $1, result = $2
            WHERE deck_date = $3 AND phrase_id = $4
            "#,
        )
        .bind(status.as_str())
        .bind(result.map(|r| r.as_str()))
        .bind(date)
        .bind(phrase_id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(ApiError::NotFound(format!(
                "Deck entry {} on {}",
                phrase_id, date
            )));
        }

        if let Some(result) = result {
            let current = sqlx::query_as::<_, DbProgress>(
                r#"
                SELECT phrase_id, mastery, last_seen, seen_count
                FROM progress
                WHERE phrase_id = $1
                FOR UPDATE
                "#,
            )
            .bind(phrase_id)
            .fetch_optional(&mut *tx)
            .await?
            .map(|p| p.to_core_state())
            .unwrap_or_default();

            let next = DbProgress::from_core_state(phrase_id, &current.after_review(result, now));
            upsert_progress(&mut *tx, &next).await?;
        }

        let checkin = recompute_checkin(&mut *tx, date, target_n)
            .await?
            .ok_or_else(|| ApiError::Internal(format!("Deck for {} vanished mid-review", date)))?;

        tx.commit().await?;
        Ok(checkin)
    }

    // === Check-in Repository ===

    /// Recompute and store the check-in for a date. Returns `None` when the
    /// date has no deck.
    pub async fn refresh_checkin(&self, date: NaiveDate, target_n: u32) -> Result<Option<CheckIn>> {
        let mut conn = self.pool.acquire().await?;
        recompute_checkin(&mut *conn, date, target_n).await
    }

    /// Check-ins between two dates (inclusive), newest first
    pub async fn get_checkins_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DbCheckin>> {
        let rows = sqlx::query_as::<_, DbCheckin>(
            r#"
            SELECT check_date, target_n, done_n, is_completed, updated_at
            FROM checkins
            WHERE check_date BETWEEN $1 AND $2
            ORDER BY check_date DESC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

/// Insert or update a progress row
async fn upsert_progress(conn: &mut PgConnection, progress: &DbProgress) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO progress (phrase_id, mastery, last_seen, seen_count)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (phrase_id) DO UPDATE SET
            mastery = EXCLUDED.mastery,
            last_seen = EXCLUDED.last_seen,
            seen_count = EXCLUDED.seen_count
        "#,
    )
    .bind(progress.phrase_id)
    .bind(progress.mastery)
    .bind(progress.last_seen)
    .bind(progress.seen_count)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Tally a day's deck and upsert its check-in row
async fn recompute_checkin(
    conn: &mut PgConnection,
    date: NaiveDate,
    target_n: u32,
) -> Result<Option<CheckIn>> {
    let statuses: Vec<String> = sqlx::query_scalar("SELECT status FROM decks WHERE deck_date = $1")
        .bind(date)
        .fetch_all(&mut *conn)
        .await?;

    let tally = DeckTally::from_statuses(statuses.iter().map(|s| DeckStatus::from_str(s)));
    if tally.total == 0 {
        return Ok(None);
    }
    let checkin = tally.to_checkin(date, target_n);

    sqlx::query(
        r#"
        INSERT INTO checkins (check_date, target_n, done_n, is_completed, updated_at)
        VALUES ($1, $2, $3, $4, NOW())
        ON CONFLICT (check_date) DO UPDATE SET
            target_n = EXCLUDED.target_n,
            done_n = EXCLUDED.done_n,
            is_completed = EXCLUDED.is_completed,
            updated_at = NOW()
        "#,
    )
    .bind(checkin.date)
    .bind(checkin.target_n as i32)
    .bind(checkin.done_n as i32)
    .bind(checkin.completed)
    .execute(&mut *conn)
    .await?;

    Ok(Some(checkin))
}

/// Wrap user input in `%...%` for ILIKE, escaping wildcard characters
fn like_pattern(input: &str) -> String {
    let escaped = input
        .trim()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}
