//! Goal API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{success, ApiResult};
use crate::models::{CreateTextRequest, EntityId, Goal};
use crate::AppState;

/// GET /api/goals - List goals in insertion order.
pub async fn list_goals(State(state): State<AppState>) -> ApiResult<Vec<Goal>> {
    success(state.dashboard.goals.list().await?)
}

/// POST /api/goals - Add a goal.
pub async fn create_goal(
    State(state): State<AppState>,
    Json(request): Json<CreateTextRequest>,
) -> ApiResult<Goal> {
    success(state.dashboard.goals.add(&request.text).await?)
}

/// POST /api/goals/:id/toggle - Flip the completed flag.
pub async fn toggle_goal(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> ApiResult<Vec<Goal>> {
    state.dashboard.goals.toggle_complete(id).await?;
    success(state.dashboard.goals.list().await?)
}

/// DELETE /api/goals/:id - Delete a goal.
pub async fn delete_goal(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> ApiResult<Vec<Goal>> {
    state.dashboard.goals.delete(id).await?;
    success(state.dashboard.goals.list().await?)
}
