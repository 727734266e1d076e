//! Database models and API types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// Re-export shared types from checkin-core
pub use checkin_core::types::{CheckIn, DeckStatus, Mastery, ProgressState, ReviewResult};
pub use checkin_core::CheckinSettings;

use crate::services::uploads::UploadPreview;

// === Database Entity Types ===

/// Phrase stored in PostgreSQL
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbPhrase {
    pub id: Uuid,
    pub scene: String,
    pub en: String,
    pub zh: String,
    pub tags: String,
    pub level: String,
    pub created_at: DateTime<Utc>,
}

/// Phrase id with its current mastery (0 when never reviewed)
#[derive(Debug, Clone, FromRow)]
pub struct PhraseMastery {
    pub id: Uuid,
    pub mastery: i32,
}

/// Progress row in PostgreSQL
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbProgress {
    pub phrase_id: Uuid,
    pub mastery: i32,
    pub last_seen: Option<DateTime<Utc>>,
    pub seen_count: i32,
}

impl DbProgress {
    /// Convert to checkin-core ProgressState
    pub fn to_core_state(&self) -> ProgressState {
        ProgressState {
            mastery: Mastery::from_value(self.mastery),
            seen_count: self.seen_count.max(0) as u32,
            last_seen: self.last_seen,
        }
    }

    /// Create from checkin-core ProgressState
    pub fn from_core_state(phrase_id: Uuid, state: &ProgressState) -> Self {
        Self {
            phrase_id,
            mastery: state.mastery.to_value(),
            last_seen: state.last_seen,
            seen_count: state.seen_count.min(i32::MAX as u32) as i32,
        }
    }
}

/// Deck entry joined with its phrase
#[derive(Debug, Clone, FromRow)]
pub struct DbDeckCard {
    pub phrase_id: Uuid,
    pub position: i32,
    pub status: String,
    pub result: Option<String>,
    pub scene: String,
    pub en: String,
    pub zh: String,
}

impl DbDeckCard {
    /// Convert to API card type
    pub fn to_api_card(&self) -> DeckCard {
        DeckCard {
            phrase_id: self.phrase_id,
            position: self.position,
            status: DeckStatus::from_str(&self.status),
            result: self.result.as_deref().and_then(ReviewResult::from_str),
            scene: self.scene.clone(),
            en: self.en.clone(),
            zh: self.zh.clone(),
        }
    }
}

/// Check-in row in PostgreSQL
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCheckin {
    pub check_date: NaiveDate,
    pub target_n: i32,
    pub done_n: i32,
    pub is_completed: bool,
    pub updated_at: DateTime<Utc>,
}

impl DbCheckin {
    /// Convert to checkin-core CheckIn
    pub fn to_core(&self) -> CheckIn {
        CheckIn {
            date: self.check_date,
            target_n: self.target_n.max(0) as u32,
            done_n: self.done_n.max(0) as u32,
            completed: self.is_completed,
        }
    }
}

// === API Request/Response Types ===

/// A card in today's deck
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckCard {
    pub phrase_id: Uuid,
    pub position: i32,
    pub status: DeckStatus,
    pub result: Option<ReviewResult>,
    pub scene: String,
    pub en: String,
    pub zh: String,
}

// Today types
#[derive(Debug, Serialize, Deserialize)]
pub struct TodayQuery {
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodayResponse {
    pub date: NaiveDate,
    pub target_n: u32,
    pub deck_size: usize,
    pub done_n: u32,
    pub completed: bool,
    pub cursor: Option<usize>,
    pub current: Option<DeckCard>,
    pub cards: Vec<DeckCard>,
}

// Stats types
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsQuery {
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub days: Vec<CheckIn>,
    pub streak: u32,
}

// Library types
#[derive(Debug, Serialize, Deserialize)]
pub struct LibraryQuery {
    pub scene: Option<String>,
    pub keyword: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LibraryResponse {
    pub phrases: Vec<DbPhrase>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImportReport {
    pub inserted: usize,
    pub duplicates: usize,
    pub total_rows: usize,
    pub dropped_rows: usize,
}

// Upload types
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadQuery {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadListResponse {
    pub files: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadPreviewResponse {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub total_rows: usize,
    pub missing_columns: Vec<String>,
}

impl From<UploadPreview> for UploadPreviewResponse {
    fn from(preview: UploadPreview) -> Self {
        Self {
            name: preview.name,
            headers: preview.headers,
            rows: preview.rows,
            total_rows: preview.total_rows,
            missing_columns: preview.missing_columns,
        }
    }
}

// Settings types
#[derive(Debug, Serialize, Deserialize)]
pub struct SettingsResponse {
    pub daily_n: u32,
    pub seed: String,
}

impl From<CheckinSettings> for SettingsResponse {
    fn from(settings: CheckinSettings) -> Self {
        Self {
            daily_n: settings.daily_n,
            seed: settings.seed,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateSettingsRequest {
    pub daily_n: Option<i64>,
    pub seed: Option<String>,
}
