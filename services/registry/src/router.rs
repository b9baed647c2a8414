use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use rito_core::health::{healthz, readyz};
use rito_core::middleware::request_id_layer;

use crate::handlers::{
    device::{device_account, device_status, refresh_code, register_device, update_location},
    legacy::{
        legacy_device_status, legacy_refresh_code, legacy_register_device, legacy_update_location,
    },
    ping,
    registration::browser_register,
    social::{attach_social, detach_social},
    user::{create_user, list_user_devices},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/api/ping", get(ping))
        // Users
        .route("/api/users", post(create_user))
        .route("/api/users/{username}/devices", get(list_user_devices))
        // Device path (firmware)
        .route("/api/device/register", post(register_device))
        .route("/api/device/status", post(device_status))
        .route("/api/device/location", post(update_location))
        .route("/api/device/refresh-code", post(refresh_code))
        .route("/api/device/{ieda}", get(device_account))
        // Browser path
        .route("/api/register", post(browser_register))
        .route("/api/account/social", post(attach_social))
        .route("/api/account/social/{platform}", delete(detach_social))
        // Legacy firmware surface
        .route("/device/register", post(legacy_register_device))
        .route("/device/status", post(legacy_device_status))
        .route("/device/location", post(legacy_update_location))
        .route("/device/refresh-code", post(legacy_refresh_code))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
