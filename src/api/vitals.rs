use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ApiError, AppState};
use crate::models::{CreateVitalReading, FatigueAssessment, VitalReading};

/// Outbound assessment shape: the echoed reading plus the classifier's
/// verdict.
#[derive(Debug, Serialize, Deserialize)]
pub struct VitalsResponse {
    pub id: Uuid,
    pub athlete_id: Uuid,
    pub heart_rate: i32,
    pub hrv: Option<f64>,
    pub rmssd: Option<f64>,
    pub body_temperature: Option<f64>,
    pub spo2: Option<i32>,
    pub timestamp: DateTime<Utc>,
    pub fatigue_status: String,
    pub confidence: Option<f64>,
    pub assessment_id: Uuid,
}

impl VitalsResponse {
    pub fn from_records(reading: VitalReading, assessment: FatigueAssessment) -> Self {
        Self {
            id: reading.id,
            athlete_id: reading.athlete_id,
            heart_rate: reading.heart_rate,
            hrv: reading.hrv,
            rmssd: reading.rmssd,
            body_temperature: reading.body_temperature,
            spo2: reading.spo2,
            timestamp: reading.timestamp,
            fatigue_status: assessment.fatigue_status,
            confidence: assessment.confidence,
            assessment_id: assessment.id,
        }
    }
}

/// Receive a raw strap sample, score it, and return the persisted reading
/// with its assessment.
pub async fn log_vitals(
    State(state): State<AppState>,
    Json(payload): Json<CreateVitalReading>,
) -> Result<(StatusCode, Json<VitalsResponse>), ApiError> {
    let (reading, assessment) = state.assessments.assess(&payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(VitalsResponse::from_records(reading, assessment)),
    ))
}
