pub mod device;
pub mod legacy;
pub mod registration;
pub mod social;
pub mod user;

use axum::Json;

/// Handler for `GET /api/ping` — kept for old firmware that probes this
/// path instead of `/healthz`.
pub async fn ping() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "success", "message": "pong" }))
}
