//! Idea bank API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{success, ApiResult};
use crate::models::{CreateTextRequest, EntityId, Idea};
use crate::AppState;

/// GET /api/ideas - List ideas in insertion order.
pub async fn list_ideas(State(state): State<AppState>) -> ApiResult<Vec<Idea>> {
    success(state.dashboard.ideas.list().await?)
}

/// POST /api/ideas - Save an idea.
pub async fn create_idea(
    State(state): State<AppState>,
    Json(request): Json<CreateTextRequest>,
) -> ApiResult<Idea> {
    success(state.dashboard.ideas.add(&request.text).await?)
}

/// POST /api/ideas/:id/toggle - Flip the used flag.
pub async fn toggle_idea(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> ApiResult<Vec<Idea>> {
    state.dashboard.ideas.toggle_used(id).await?;
    success(state.dashboard.ideas.list().await?)
}

/// DELETE /api/ideas/:id - Delete an idea.
pub async fn delete_idea(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> ApiResult<Vec<Idea>> {
    state.dashboard.ideas.delete(id).await?;
    success(state.dashboard.ideas.list().await?)
}
