use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;

use super::{ApiError, AppState};
use crate::models::{WorkoutLog, WorkoutResponse};

/// Score a workout checklist and persist the session.
pub async fn log_workout(
    State(state): State<AppState>,
    Json(payload): Json<WorkoutLog>,
) -> Result<(StatusCode, Json<WorkoutResponse>), ApiError> {
    let (_session, response) = state.compliance.log_workout(payload).await?;
    Ok((StatusCode::CREATED, Json(response)))
}
