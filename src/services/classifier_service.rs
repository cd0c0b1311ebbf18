use ndarray::ArrayView1;
use std::collections::BTreeMap;
use tracing::{error, warn};

use crate::config::ClassifierConfig;
use crate::ml::ClassifierArtifact;

/// Label returned for every classification while no usable artifact is
/// loaded.
pub const SAFE_LABEL: &str = "Normal";
/// Sentinel label for an inference that failed; distinct from any genuine
/// classification the model can emit.
pub const SENTINEL_LABEL: &str = "AI_Error";

/// Result of one classification call. Adapter-side failures are data, not
/// errors; the caller matches on the variant and decides what to persist.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifierOutcome {
    Classified {
        label: String,
        probabilities: Option<BTreeMap<String, f64>>,
    },
    /// No artifact loaded; the safe default label applies.
    Degraded,
    /// The model faulted on this vector. The cause is for logging only.
    InferenceFailed { cause: String },
}

/// Process-wide adapter around the loaded classifier artifact. Built once at
/// startup and shared read-only across all scoring calls.
pub struct ClassifierService {
    artifact: Option<ClassifierArtifact>,
    config: ClassifierConfig,
}

impl ClassifierService {
    /// Load the artifact named by the configuration. A missing or unreadable
    /// artifact puts the adapter into degraded mode; that is logged once here
    /// rather than on every request.
    pub fn from_config(config: ClassifierConfig) -> Self {
        let artifact = match ClassifierArtifact::load(&config.model_path) {
            Ok(artifact) => Some(artifact),
            Err(e) => {
                warn!(
                    "no usable classifier artifact at {}: {e:#}. Fatigue scoring will return '{SAFE_LABEL}'",
                    config.model_path.display()
                );
                None
            }
        };

        Self { artifact, config }
    }

    /// Build an adapter around an already-loaded artifact.
    pub fn with_artifact(artifact: ClassifierArtifact, config: ClassifierConfig) -> Self {
        Self {
            artifact: Some(artifact),
            config,
        }
    }

    /// Build an adapter with no artifact at all.
    pub fn degraded(config: ClassifierConfig) -> Self {
        Self {
            artifact: None,
            config,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.artifact.is_none()
    }

    /// Ordered feature schema the feature builder must honor: the artifact's
    /// own when it self-describes, otherwise the configured fallback.
    pub fn feature_names(&self) -> &[String] {
        match &self.artifact {
            Some(artifact) if !artifact.feature_names.is_empty() => &artifact.feature_names,
            _ => &self.config.fallback_features,
        }
    }

    /// Class labels the loaded model can emit; empty in degraded mode.
    pub fn classes(&self) -> &[String] {
        match &self.artifact {
            Some(artifact) => &artifact.classes,
            None => &[],
        }
    }

    pub fn model_path(&self) -> &std::path::Path {
        &self.config.model_path
    }

    /// Classify one feature vector. Never panics and never returns an error:
    /// degraded mode and inference faults are explicit outcomes.
    pub fn classify(&self, vector: ArrayView1<'_, f64>) -> ClassifierOutcome {
        let artifact = match &self.artifact {
            Some(artifact) => artifact,
            None => return ClassifierOutcome::Degraded,
        };

        let label = match artifact.predict(vector) {
            Ok(label) => label.to_string(),
            Err(fault) => {
                return ClassifierOutcome::InferenceFailed {
                    cause: fault.to_string(),
                }
            }
        };

        let probabilities = match artifact.predict_proba(vector) {
            Ok(Some(probs)) => Some(
                artifact
                    .classes
                    .iter()
                    .cloned()
                    .zip(probs)
                    .collect::<BTreeMap<_, _>>(),
            ),
            Ok(None) => None,
            Err(fault) => {
                // predict succeeded but the vote arrays are unusable; keep
                // the label, drop the confidence.
                error!("probability estimation failed: {fault}");
                None
            }
        };

        ClassifierOutcome::Classified {
            label,
            probabilities,
        }
    }
}
