// handlers/sys/health.rs - GET /sys/health handler

use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::app::AppState;

/// Liveness only; downstream services are not probed
pub async fn sys_health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "service": &*state.service_name,
        "isAlive": true
    }))
}
