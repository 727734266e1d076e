//! Settings endpoints

use axum::{extract::State, Json};
use checkin_core::settings::{clamp_daily_n, normalize_seed, DAILY_N_KEY, SEED_KEY};

use crate::error::Result;
use crate::models::*;
use crate::AppState;

/// GET /api/settings
pub async fn get_all(State(state): State<AppState>) -> Result<Json<SettingsResponse>> {
    let settings = state.db.get_checkin_settings().await?;
    Ok(Json(settings.into()))
}

/// PUT /api/settings
///
/// `daily_n` is clamped to its allowed range and a blank seed falls back to
/// the default before either is stored.
pub async fn update(
    State(state): State<AppState>,
    Json(request): Json<UpdateSettingsRequest>,
) -> Result<Json<SettingsResponse>> {
    if let Some(daily_n) = request.daily_n {
        let clamped = clamp_daily_n(daily_n);
        state
            .db
            .set_setting(DAILY_N_KEY, &clamped.to_string())
            .await?;
    }
    if let Some(seed) = request.seed.as_deref() {
        state.db.set_setting(SEED_KEY, &normalize_seed(seed)).await?;
    }

    let settings = state.db.get_checkin_settings().await?;
    tracing::info!(
        "Settings updated: daily_n={}, seed={:?}",
        settings.daily_n,
        settings.seed
    );
    Ok(Json(settings.into()))
}
