use axum::Json;
use serde_json::{Value, json};

/// Liveness check. No side effects.
pub async fn root() -> Json<Value> {
    Json(json!({ "status": "Gally Agent is alive." }))
}

pub async fn health() -> &'static str {
    "ok"
}
