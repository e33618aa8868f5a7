//! Memory API endpoints.

use axum::{extract::State, http::StatusCode, Json};

use crate::errors::AppError;
use crate::models::{Memory, NewMemory};
use crate::AppState;

/// POST /api/memories - Share a memory, optionally with an embedded photo.
pub async fn create_memory(
    State(state): State<AppState>,
    Json(request): Json<NewMemory>,
) -> Result<(StatusCode, Json<Memory>), AppError> {
    let memory = state.service.submit_memory(&request).await?;
    Ok((StatusCode::CREATED, Json(memory)))
}

/// GET /api/memories - List all memories, newest first.
pub async fn list_memories(State(state): State<AppState>) -> Result<Json<Vec<Memory>>, AppError> {
    let memories = state.repo.list_memories().await?;
    Ok(Json(memories))
}
