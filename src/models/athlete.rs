use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Athlete {
    pub id: Uuid,
    pub name: String,
    pub position: Option<String>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub age: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAthlete {
    pub name: String,
    pub position: Option<String>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub age: Option<i32>,
}
