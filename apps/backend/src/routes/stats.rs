//! Check-in stats endpoint

use axum::{
    extract::{Query, State},
    Json,
};

use crate::error::Result;
use crate::models::*;
use crate::services::{resolve_date, stats};
use crate::AppState;

/// GET /api/stats
pub async fn get(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<StatsResponse>> {
    let today = resolve_date(query.date);
    Ok(Json(stats::checkin_stats(&state.db, today).await?))
}
