// Business logic services

pub mod athlete_service;
pub mod classifier_service;
pub mod compliance_scoring_service;
pub mod fatigue_assessment_service;
pub mod feature_vector_service;

pub use athlete_service::AthleteService;
pub use classifier_service::{ClassifierOutcome, ClassifierService};
pub use compliance_scoring_service::ComplianceScoringService;
pub use fatigue_assessment_service::FatigueAssessmentService;
pub use feature_vector_service::FeatureVectorService;
