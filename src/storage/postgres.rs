use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use super::RecordStore;
use crate::models::{
    Athlete, CreateAthlete, CreateFatigueAssessment, CreateTrainingSession, CreateVitalReading,
    FatigueAssessment, TrainingSession, VitalReading,
};

/// Postgres-backed record store. Ids and timestamps are generated here so
/// inserted rows round-trip without relying on database defaults.
#[derive(Clone)]
pub struct PostgresRecordStore {
    pool: PgPool,
}

impl PostgresRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PostgresRecordStore {
    async fn create_athlete(&self, athlete: CreateAthlete) -> Result<Athlete> {
        let created = sqlx::query_as::<_, Athlete>(
            r#"
            INSERT INTO athletes (id, name, position, height_cm, weight_kg, age, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, position, height_cm, weight_kg, age, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&athlete.name)
        .bind(&athlete.position)
        .bind(athlete.height_cm)
        .bind(athlete.weight_kg)
        .bind(athlete.age)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn get_athlete(&self, id: Uuid) -> Result<Option<Athlete>> {
        let athlete = sqlx::query_as::<_, Athlete>(
            "SELECT id, name, position, height_cm, weight_kg, age, created_at FROM athletes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(athlete)
    }

    async fn list_athletes(&self, offset: i64, limit: i64) -> Result<Vec<Athlete>> {
        let athletes = sqlx::query_as::<_, Athlete>(
            "SELECT id, name, position, height_cm, weight_kg, age, created_at FROM athletes ORDER BY created_at DESC OFFSET $1 LIMIT $2",
        )
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(athletes)
    }

    async fn delete_athlete(&self, id: Uuid) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM fatigue_assessments WHERE athlete_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM vital_readings WHERE athlete_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM training_sessions WHERE athlete_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let deleted = sqlx::query("DELETE FROM athletes WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(deleted.rows_affected() > 0)
    }

    async fn create_vital_reading(&self, reading: &CreateVitalReading) -> Result<VitalReading> {
        let created = sqlx::query_as::<_, VitalReading>(
            r#"
            INSERT INTO vital_readings (id, athlete_id, heart_rate, hrv, rmssd, body_temperature, spo2, timestamp)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, athlete_id, heart_rate, hrv, rmssd, body_temperature, spo2, timestamp
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(reading.athlete_id)
        .bind(reading.heart_rate)
        .bind(reading.hrv)
        .bind(reading.rmssd)
        .bind(reading.body_temperature)
        .bind(reading.spo2)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn get_vital_reading(&self, id: Uuid) -> Result<Option<VitalReading>> {
        let reading = sqlx::query_as::<_, VitalReading>(
            "SELECT id, athlete_id, heart_rate, hrv, rmssd, body_temperature, spo2, timestamp FROM vital_readings WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(reading)
    }

    async fn create_fatigue_assessment(
        &self,
        assessment: CreateFatigueAssessment,
    ) -> Result<FatigueAssessment> {
        let created = sqlx::query_as::<_, FatigueAssessment>(
            r#"
            INSERT INTO fatigue_assessments (id, athlete_id, vital_reading_id, fatigue_status, confidence, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, athlete_id, vital_reading_id, fatigue_status, confidence, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(assessment.athlete_id)
        .bind(assessment.vital_reading_id)
        .bind(&assessment.fatigue_status)
        .bind(assessment.confidence)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn create_training_session(
        &self,
        session: CreateTrainingSession,
    ) -> Result<TrainingSession> {
        let created = sqlx::query_as::<_, TrainingSession>(
            r#"
            INSERT INTO training_sessions
                (id, athlete_id, session_type, exercises_planned, exercises_completed,
                 planned_load, actual_load, compliance_score, timestamp)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, athlete_id, session_type, exercises_planned, exercises_completed,
                      planned_load, actual_load, compliance_score, timestamp
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(session.athlete_id)
        .bind(&session.session_type)
        .bind(&session.exercises_planned)
        .bind(&session.exercises_completed)
        .bind(session.planned_load)
        .bind(session.actual_load)
        .bind(session.compliance_score)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }
}
