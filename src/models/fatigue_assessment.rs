use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The classifier's verdict for exactly one vital reading.
/// Never updated in place; a new reading yields a new assessment.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FatigueAssessment {
    pub id: Uuid,
    pub athlete_id: Uuid,
    pub vital_reading_id: Uuid,
    pub fatigue_status: String,
    pub confidence: Option<f64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFatigueAssessment {
    pub athlete_id: Uuid,
    pub vital_reading_id: Uuid,
    pub fatigue_status: String,
    pub confidence: Option<f64>,
}
