// HTTP boundary; handlers delegate to services and hold no scoring logic

pub mod athletes;
pub mod routes;
pub mod vitals;
pub mod workouts;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use std::sync::Arc;

use crate::services::{
    AthleteService, ClassifierService, ComplianceScoringService, FatigueAssessmentService,
};
use crate::storage::RecordStore;

/// Shared application state: one store, one classifier, the services built
/// over them. Everything here is immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub classifier: Arc<ClassifierService>,
    pub athletes: AthleteService,
    pub assessments: FatigueAssessmentService,
    pub compliance: ComplianceScoringService,
}

/// Maps service-level errors onto a JSON 500 response.
pub struct ApiError(anyhow::Error);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": "Internal server error",
            "message": self.0.to_string(),
        }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
