use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::models::{CreateTrainingSession, TrainingSession, WorkoutLog, WorkoutResponse};
use crate::storage::RecordStore;

/// Computes training compliance and realized load from a planned/completed
/// exercise checklist and persists the session.
#[derive(Clone)]
pub struct ComplianceScoringService {
    store: Arc<dyn RecordStore>,
}

impl ComplianceScoringService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Compliance is a pure length ratio: completed count over planned count,
    /// 0.0 when nothing was planned. Deliberately no set intersection, so
    /// duplicates or out-of-plan exercises push compliance past 1.0. Actual
    /// load scales the planned load by that ratio.
    pub fn score(planned: &[String], completed: &[String], planned_load: f64) -> (f64, f64) {
        let compliance = if planned.is_empty() {
            0.0
        } else {
            completed.len() as f64 / planned.len() as f64
        };

        (compliance, planned_load * compliance)
    }

    /// Display form of a compliance ratio, one decimal place.
    pub fn format_compliance(compliance: f64) -> String {
        format!("{:.1}%", compliance * 100.0)
    }

    /// Score a checklist submission and persist the resulting session.
    pub async fn log_workout(&self, log: WorkoutLog) -> Result<(TrainingSession, WorkoutResponse)> {
        let (compliance, actual_load) =
            Self::score(&log.exercises_planned, &log.exercises_completed, log.planned_load_score);

        let session = self
            .store
            .create_training_session(CreateTrainingSession {
                athlete_id: log.athlete_id,
                session_type: log.session_type,
                exercises_planned: log.exercises_planned,
                exercises_completed: log.exercises_completed,
                planned_load: log.planned_load_score,
                actual_load,
                compliance_score: compliance,
            })
            .await?;

        info!(
            athlete_id = %session.athlete_id,
            compliance,
            actual_load,
            "logged training session {}",
            session.id
        );

        let response = WorkoutResponse {
            status: "Logged".to_string(),
            compliance_score: Self::format_compliance(compliance),
            actual_load,
        };

        Ok((session, response))
    }
}
