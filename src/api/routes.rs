use axum::extract::State;
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::athletes::{create_athlete, delete_athlete, get_athlete, list_athletes};
use super::vitals::log_vitals;
use super::workouts::log_workout;
use super::AppState;

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/schema", get(schema))
        .route("/api/athletes", post(create_athlete).get(list_athletes))
        .route(
            "/api/athletes/:id",
            get(get_athlete).delete(delete_athlete),
        )
        .route("/api/vitals", post(log_vitals))
        .route("/api/workouts", post(log_workout))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Echoes the feature schema and class labels the loaded model declares,
/// plus whether the adapter is running degraded.
async fn schema(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "features": state.classifier.feature_names(),
        "classes": state.classifier.classes(),
        "model_path": state.classifier.model_path().display().to_string(),
        "degraded": state.classifier.is_degraded(),
    }))
}
