use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info};

use crate::models::{CreateFatigueAssessment, CreateVitalReading, FatigueAssessment, VitalReading};
use crate::services::classifier_service::{
    ClassifierOutcome, ClassifierService, SAFE_LABEL, SENTINEL_LABEL,
};
use crate::services::FeatureVectorService;
use crate::storage::RecordStore;

/// Orchestrates the scoring pipeline for one incoming reading: persist the
/// raw sample, build its feature vector, classify, persist the linked
/// assessment.
#[derive(Clone)]
pub struct FatigueAssessmentService {
    store: Arc<dyn RecordStore>,
    classifier: Arc<ClassifierService>,
    features: FeatureVectorService,
}

impl FatigueAssessmentService {
    pub fn new(
        store: Arc<dyn RecordStore>,
        classifier: Arc<ClassifierService>,
        features: FeatureVectorService,
    ) -> Self {
        Self {
            store,
            classifier,
            features,
        }
    }

    /// Score one sample. The raw reading is written first and is never lost:
    /// feature-build failures and adapter faults downgrade the assessment to
    /// a sentinel or safe label instead of aborting. Only store errors
    /// propagate.
    pub async fn assess(
        &self,
        sample: &CreateVitalReading,
    ) -> Result<(VitalReading, FatigueAssessment)> {
        let reading = self.store.create_vital_reading(sample).await?;

        let outcome = match self.features.build(sample, self.classifier.feature_names()) {
            Ok(vector) => self.classifier.classify(vector.view()),
            Err(e) => ClassifierOutcome::InferenceFailed {
                cause: e.to_string(),
            },
        };

        let (fatigue_status, confidence) = match outcome {
            ClassifierOutcome::Classified {
                label,
                probabilities,
            } => {
                let confidence = probabilities.as_ref().and_then(|probs| {
                    probs
                        .values()
                        .copied()
                        .fold(None, |max: Option<f64>, p| match max {
                            Some(m) if m >= p => Some(m),
                            _ => Some(p),
                        })
                });
                (label, confidence)
            }
            ClassifierOutcome::Degraded => (SAFE_LABEL.to_string(), None),
            ClassifierOutcome::InferenceFailed { cause } => {
                error!(
                    reading_id = %reading.id,
                    "fatigue inference failed, recording sentinel status: {cause}"
                );
                (SENTINEL_LABEL.to_string(), None)
            }
        };

        let assessment = self
            .store
            .create_fatigue_assessment(CreateFatigueAssessment {
                athlete_id: reading.athlete_id,
                vital_reading_id: reading.id,
                fatigue_status,
                confidence,
            })
            .await?;

        info!(
            athlete_id = %assessment.athlete_id,
            status = %assessment.fatigue_status,
            "assessed vital reading {}",
            reading.id
        );

        Ok((reading, assessment))
    }
}
