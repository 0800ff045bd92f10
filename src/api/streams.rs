//! Stream planner API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{success, ApiResult};
use crate::models::{CreateStreamRequest, EntityId, Stream};
use crate::AppState;

/// GET /api/streams - List scheduled streams in date order.
pub async fn list_streams(State(state): State<AppState>) -> ApiResult<Vec<Stream>> {
    success(state.dashboard.streams.list().await?)
}

/// POST /api/streams - Schedule a stream.
pub async fn create_stream(
    State(state): State<AppState>,
    Json(request): Json<CreateStreamRequest>,
) -> ApiResult<Stream> {
    success(
        state
            .dashboard
            .streams
            .add(&request.title, &request.date)
            .await?,
    )
}

/// POST /api/streams/:id/toggle - Flip the completed flag.
pub async fn toggle_stream(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> ApiResult<Vec<Stream>> {
    state.dashboard.streams.toggle_complete(id).await?;
    success(state.dashboard.streams.list().await?)
}

/// DELETE /api/streams/:id - Delete a stream. Unknown ids are a no-op.
pub async fn delete_stream(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> ApiResult<Vec<Stream>> {
    state.dashboard.streams.delete(id).await?;
    success(state.dashboard.streams.list().await?)
}
