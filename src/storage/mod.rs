// Durable record storage consumed by the scoring services

pub mod postgres;

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{
    Athlete, CreateAthlete, CreateFatigueAssessment, CreateTrainingSession, CreateVitalReading,
    FatigueAssessment, TrainingSession, VitalReading,
};

pub use postgres::PostgresRecordStore;

/// Create/query operations the scoring core consumes. Implementations must
/// tolerate concurrent callers; the services hold no locks of their own.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn create_athlete(&self, athlete: CreateAthlete) -> Result<Athlete>;
    async fn get_athlete(&self, id: Uuid) -> Result<Option<Athlete>>;
    async fn list_athletes(&self, offset: i64, limit: i64) -> Result<Vec<Athlete>>;
    /// Deletes the athlete together with its readings, assessments, and
    /// sessions. Returns false when no such athlete exists.
    async fn delete_athlete(&self, id: Uuid) -> Result<bool>;

    async fn create_vital_reading(&self, reading: &CreateVitalReading) -> Result<VitalReading>;
    async fn get_vital_reading(&self, id: Uuid) -> Result<Option<VitalReading>>;

    async fn create_fatigue_assessment(
        &self,
        assessment: CreateFatigueAssessment,
    ) -> Result<FatigueAssessment>;

    async fn create_training_session(
        &self,
        session: CreateTrainingSession,
    ) -> Result<TrainingSession>;
}
