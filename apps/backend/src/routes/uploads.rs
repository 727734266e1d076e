//! Saved upload endpoints

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::error::Result;
use crate::models::*;
use crate::services::library;
use crate::AppState;

/// GET /api/uploads
pub async fn list(State(state): State<AppState>) -> Result<Json<UploadListResponse>> {
    let files = state.uploads.list().await?;
    Ok(Json(UploadListResponse { files }))
}

/// POST /api/uploads?name=
pub async fn save(
    State(state): State<AppState>,
    Query(query): Query<UploadQuery>,
    body: Bytes,
) -> Result<(StatusCode, Json<UploadPreviewResponse>)> {
    let stored = state.uploads.save(&query.name, &body).await?;
    let (preview, _) = state.uploads.preview(&stored).await?;
    Ok((StatusCode::CREATED, Json(preview.into())))
}

/// GET /api/uploads/:name
pub async fn preview(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<UploadPreviewResponse>> {
    let (preview, _) = state.uploads.preview(&name).await?;
    Ok(Json(preview.into()))
}

/// POST /api/uploads/:name/import
pub async fn import(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ImportReport>> {
    let (_, table) = state.uploads.preview(&name).await?;
    Ok(Json(library::import_table(&state.db, table).await?))
}

/// DELETE /api/uploads/:name
pub async fn delete(State(state): State<AppState>, Path(name): Path<String>) -> Result<StatusCode> {
    state.uploads.delete(&name).await?;
    Ok(StatusCode::NO_CONTENT)
}
