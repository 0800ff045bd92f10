//! Dashboard summary and theme endpoints.

use axum::extract::State;
use chrono::Local;

use super::{success, ApiResult};
use crate::models::{DashboardSummary, Theme};
use crate::AppState;

/// GET /api/dashboard - Next upcoming stream and current counters.
pub async fn get_dashboard(State(state): State<AppState>) -> ApiResult<DashboardSummary> {
    let now = Local::now().naive_local();
    success(state.dashboard.aggregator.summary(now).await?)
}

/// GET /api/theme - Stored theme preference.
pub async fn get_theme(State(state): State<AppState>) -> ApiResult<Theme> {
    success(state.dashboard.theme.current().await?)
}

/// POST /api/theme/toggle - Switch between light and dark.
pub async fn toggle_theme(State(state): State<AppState>) -> ApiResult<Theme> {
    success(state.dashboard.theme.toggle().await?)
}
