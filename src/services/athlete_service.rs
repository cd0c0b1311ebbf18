use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::models::{Athlete, CreateAthlete};
use crate::storage::RecordStore;

/// Athlete profile management over the record store.
#[derive(Clone)]
pub struct AthleteService {
    store: Arc<dyn RecordStore>,
}

impl AthleteService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn create_athlete(&self, athlete: CreateAthlete) -> Result<Athlete> {
        let created = self.store.create_athlete(athlete).await?;
        info!("created athlete {} ({})", created.id, created.name);
        Ok(created)
    }

    pub async fn get_athlete(&self, id: Uuid) -> Result<Option<Athlete>> {
        self.store.get_athlete(id).await
    }

    pub async fn list_athletes(&self, offset: i64, limit: i64) -> Result<Vec<Athlete>> {
        self.store.list_athletes(offset, limit).await
    }

    /// Removes the athlete and cascades its readings and assessments.
    pub async fn delete_athlete(&self, id: Uuid) -> Result<bool> {
        let deleted = self.store.delete_athlete(id).await?;
        if deleted {
            info!("deleted athlete {id} and dependent records");
        }
        Ok(deleted)
    }
}
