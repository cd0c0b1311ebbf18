use thiserror::Error;

/// Errors raised while turning a raw sensor sample into a feature vector.
///
/// Adapter-side conditions (missing artifact, inference failure) are not
/// errors; they are explicit `ClassifierOutcome` variants consumed by the
/// assessment service.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoringError {
    #[error("feature '{feature}' is not numeric: {value}")]
    FeatureValue { feature: String, value: String },
    #[error("feature '{feature}' has no value and no configured default")]
    MissingFeature { feature: String },
}
