//! Growth tracker API endpoints.

use axum::{extract::State, Json};

use super::{success, ApiResult};
use crate::models::{GrowthCurrent, GrowthInput, GrowthSnapshot};
use crate::AppState;

/// GET /api/growth - Current follower counters.
pub async fn get_growth(State(state): State<AppState>) -> ApiResult<GrowthCurrent> {
    success(state.dashboard.growth.current_values().await?)
}

/// POST /api/growth - Record a snapshot from any subset of the counters.
pub async fn record_growth(
    State(state): State<AppState>,
    Json(input): Json<GrowthInput>,
) -> ApiResult<GrowthSnapshot> {
    success(state.dashboard.growth.record_snapshot(&input).await?)
}

/// GET /api/growth/history - Recorded snapshots, oldest first.
pub async fn get_growth_history(State(state): State<AppState>) -> ApiResult<Vec<GrowthSnapshot>> {
    success(state.dashboard.growth.history().await?)
}
