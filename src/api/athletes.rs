use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use uuid::Uuid;

use super::{ApiError, AppState};
use crate::models::{Athlete, CreateAthlete};

#[derive(Debug, Deserialize)]
pub struct PaginationQuery {
    /// Number of items to skip (default: 0)
    pub offset: Option<i64>,
    /// Maximum number of items to return (default: 50, max: 100)
    pub limit: Option<i64>,
}

impl PaginationQuery {
    pub fn get_offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }

    pub fn get_limit(&self) -> i64 {
        self.limit.unwrap_or(50).clamp(1, 100)
    }
}

pub async fn create_athlete(
    State(state): State<AppState>,
    Json(payload): Json<CreateAthlete>,
) -> Result<(StatusCode, Json<Athlete>), ApiError> {
    let athlete = state.athletes.create_athlete(payload).await?;
    Ok((StatusCode::CREATED, Json(athlete)))
}

pub async fn list_athletes(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<Vec<Athlete>>, ApiError> {
    let athletes = state
        .athletes
        .list_athletes(pagination.get_offset(), pagination.get_limit())
        .await?;
    Ok(Json(athletes))
}

pub async fn get_athlete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Athlete>, (StatusCode, String)> {
    match state.athletes.get_athlete(id).await {
        Ok(Some(athlete)) => Ok(Json(athlete)),
        Ok(None) => Err((StatusCode::NOT_FOUND, "Athlete not found".to_string())),
        Err(e) => Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string())),
    }
}

pub async fn delete_athlete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    match state.athletes.delete_athlete(id).await {
        Ok(true) => Ok(StatusCode::NO_CONTENT),
        Ok(false) => Err((StatusCode::NOT_FOUND, "Athlete not found".to_string())),
        Err(e) => Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_clamps_to_sane_bounds() {
        let q = PaginationQuery {
            offset: Some(-5),
            limit: Some(10_000),
        };
        assert_eq!(q.get_offset(), 0);
        assert_eq!(q.get_limit(), 100);

        let defaults = PaginationQuery {
            offset: None,
            limit: None,
        };
        assert_eq!(defaults.get_offset(), 0);
        assert_eq!(defaults.get_limit(), 50);
    }
}
