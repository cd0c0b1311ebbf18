use std::sync::Arc;

use synq_engine::api::routes::create_routes;
use synq_engine::api::AppState;
use synq_engine::config::{AppConfig, ClassifierConfig, DatabaseConfig};
use synq_engine::services::{
    AthleteService, ClassifierService, ComplianceScoringService, FatigueAssessmentService,
    FeatureVectorService,
};
use synq_engine::storage::{PostgresRecordStore, RecordStore};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let app_config = AppConfig::from_env()?;
    let db_config = DatabaseConfig::from_env()?;
    let classifier_config = ClassifierConfig::from_env()?;

    let pool = db_config.create_pool().await?;
    let store: Arc<dyn RecordStore> = Arc::new(PostgresRecordStore::new(pool));

    // Loaded once and shared read-only by every scoring call.
    let classifier = Arc::new(ClassifierService::from_config(classifier_config.clone()));
    let features = FeatureVectorService::new(&classifier_config);

    let state = AppState {
        store: store.clone(),
        classifier: classifier.clone(),
        athletes: AthleteService::new(store.clone()),
        assessments: FatigueAssessmentService::new(store.clone(), classifier, features),
        compliance: ComplianceScoringService::new(store),
    };

    let app = create_routes(state);

    let listener = TcpListener::bind(app_config.server_address()).await?;
    info!("SYNQ engine starting on http://{}", app_config.server_address());
    info!("Health check available at /health");

    axum::serve(listener, app).await?;

    Ok(())
}
