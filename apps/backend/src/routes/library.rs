//! Phrase library endpoints

use axum::{
    body::Bytes,
    extract::{Query, State},
    Json,
};

use crate::error::Result;
use crate::models::*;
use crate::services::library;
use crate::AppState;

/// GET /api/library
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<LibraryQuery>,
) -> Result<Json<LibraryResponse>> {
    Ok(Json(library::search(&state.db, &query).await?))
}

/// POST /api/library/import
///
/// Body is the CSV file itself.
pub async fn import(State(state): State<AppState>, body: Bytes) -> Result<Json<ImportReport>> {
    Ok(Json(library::import_csv(&state.db, &body).await?))
}
