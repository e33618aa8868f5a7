//! RSVP API endpoints.

use axum::{extract::State, http::StatusCode, Json};

use crate::errors::AppError;
use crate::models::{NewRsvp, Rsvp};
use crate::AppState;

/// POST /api/rsvp - Submit an RSVP.
pub async fn create_rsvp(
    State(state): State<AppState>,
    Json(request): Json<NewRsvp>,
) -> Result<(StatusCode, Json<Rsvp>), AppError> {
    let rsvp = state.service.submit_rsvp(&request).await?;
    Ok((StatusCode::CREATED, Json(rsvp)))
}

/// GET /api/rsvps - List all RSVPs in submission order.
pub async fn list_rsvps(State(state): State<AppState>) -> Result<Json<Vec<Rsvp>>, AppError> {
    let rsvps = state.repo.list_rsvps().await?;
    Ok(Json(rsvps))
}
