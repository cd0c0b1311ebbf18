use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A logged workout checklist with its derived compliance and load scores.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TrainingSession {
    pub id: Uuid,
    pub athlete_id: Uuid,
    pub session_type: String,
    pub exercises_planned: Vec<String>,
    pub exercises_completed: Vec<String>,
    pub planned_load: f64,
    pub actual_load: f64,
    pub compliance_score: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTrainingSession {
    pub athlete_id: Uuid,
    pub session_type: String,
    pub exercises_planned: Vec<String>,
    pub exercises_completed: Vec<String>,
    pub planned_load: f64,
    pub actual_load: f64,
    pub compliance_score: f64,
}

/// Inbound checklist submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutLog {
    pub athlete_id: Uuid,
    pub session_type: String,
    pub exercises_planned: Vec<String>,
    pub exercises_completed: Vec<String>,
    pub planned_load_score: f64,
}

/// Outbound compliance shape: status marker, percentage-formatted compliance
/// for display, raw actual load for storage-side consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutResponse {
    pub status: String,
    pub compliance_score: String,
    pub actual_load: f64,
}
