use axum::{extract::State, Json};

use crate::handlers::AppState;

pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "model_loaded": state.model.is_some(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
