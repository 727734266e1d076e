//! Today's deck endpoints

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use checkin_core::ReviewAction;

use crate::error::Result;
use crate::models::*;
use crate::routes::session::ReviewSession;
use crate::services::{resolve_date, review};
use crate::AppState;

/// GET /api/today
pub async fn view(
    State(state): State<AppState>,
    Extension(session): Extension<ReviewSession>,
    Query(query): Query<TodayQuery>,
) -> Result<Json<TodayResponse>> {
    let date = resolve_date(query.date);
    let response = review::today_view(&state.db, &state.sessions, &session.id, date).await?;
    Ok(Json(response))
}

/// POST /api/today/known
pub async fn known(
    State(state): State<AppState>,
    Extension(session): Extension<ReviewSession>,
    Query(query): Query<TodayQuery>,
) -> Result<Json<TodayResponse>> {
    respond(state, session, query, ReviewAction::Known).await
}

/// POST /api/today/unknown
pub async fn unknown(
    State(state): State<AppState>,
    Extension(session): Extension<ReviewSession>,
    Query(query): Query<TodayQuery>,
) -> Result<Json<TodayResponse>> {
    respond(state, session, query, ReviewAction::Unknown).await
}

/// POST /api/today/skip
pub async fn skip(
    State(state): State<AppState>,
    Extension(session): Extension<ReviewSession>,
    Query(query): Query<TodayQuery>,
) -> Result<Json<TodayResponse>> {
    respond(state, session, query, ReviewAction::Skip).await
}

/// POST /api/today/reset
pub async fn reset(
    State(state): State<AppState>,
    Extension(session): Extension<ReviewSession>,
    Query(query): Query<TodayQuery>,
) -> Result<Json<TodayResponse>> {
    let date = resolve_date(query.date);
    let response = review::reset_cursor(&state.db, &state.sessions, &session.id, date).await?;
    Ok(Json(response))
}

async fn respond(
    state: AppState,
    session: ReviewSession,
    query: TodayQuery,
    action: ReviewAction,
) -> Result<Json<TodayResponse>> {
    let date = resolve_date(query.date);
    let response =
        review::apply_action(&state.db, &state.sessions, &session.id, date, action).await?;
    Ok(Json(response))
}
