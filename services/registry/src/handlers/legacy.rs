//! Legacy plain-JSON surface at the original firmware paths (`/device/...`).
//!
//! Same semantics as the typed `/api` handlers; only the request field names
//! differ (`mac_address`, `requested_user`). Kept for devices in the field
//! that were flashed against the old portal.

use axum::{Json, extract::State};
use serde::Deserialize;

use crate::error::RegistryServiceError;
use crate::handlers::device::{
    DeviceStatusRequest, DeviceStatusResponse, RefreshCodeRequest, RefreshCodeResponse,
    RegisterDeviceResponse, UpdateLocationRequest, UpdateLocationResponse, device_status,
    refresh_code, update_location,
};
use crate::state::AppState;
use crate::usecase::device::{RegisterDeviceInput, RegisterDeviceUseCase};

// ── POST /device/register ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LegacyRegisterRequest {
    pub ieda: String,
    pub mac_address: Option<String>,
    pub requested_user: Option<String>,
}

pub async fn legacy_register_device(
    State(state): State<AppState>,
    Json(body): Json<LegacyRegisterRequest>,
) -> Result<Json<RegisterDeviceResponse>, RegistryServiceError> {
    let usecase = RegisterDeviceUseCase {
        devices: state.device_repo(),
    };
    let out = usecase
        .execute(RegisterDeviceInput {
            ieda: body.ieda,
            mac_address: body.mac_address,
        })
        .await?;

    let message = match &body.requested_user {
        Some(username) => format!("Registration code generated for user {username}"),
        None => "Registration code generated successfully".to_owned(),
    };
    Ok(Json(RegisterDeviceResponse {
        status: "success",
        registration_code: out.registration_code,
        device_exists: out.device_exists,
        requested_user: body.requested_user,
        message,
    }))
}

// ── POST /device/status ──────────────────────────────────────────────────────

pub async fn legacy_device_status(
    state: State<AppState>,
    body: Json<DeviceStatusRequest>,
) -> Result<Json<DeviceStatusResponse>, RegistryServiceError> {
    device_status(state, body).await
}

// ── POST /device/location ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LegacyLocationRequest {
    pub ieda: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub ip_address: Option<String>,
    pub username: Option<String>,
}

pub async fn legacy_update_location(
    state: State<AppState>,
    Json(body): Json<LegacyLocationRequest>,
) -> Result<Json<UpdateLocationResponse>, RegistryServiceError> {
    update_location(
        state,
        Json(UpdateLocationRequest {
            ieda: body.ieda,
            latitude: body.latitude,
            longitude: body.longitude,
            ip_address: body.ip_address,
            username: body.username,
        }),
    )
    .await
}

// ── POST /device/refresh-code ────────────────────────────────────────────────

pub async fn legacy_refresh_code(
    state: State<AppState>,
    body: Json<RefreshCodeRequest>,
) -> Result<Json<RefreshCodeResponse>, RegistryServiceError> {
    refresh_code(state, body).await
}
