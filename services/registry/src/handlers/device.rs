use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use crate::error::RegistryServiceError;
use crate::state::AppState;
use crate::usecase::account::LookupAccountUseCase;
use crate::usecase::device::{
    DeviceStatusInput, DeviceStatusUseCase, RefreshCodeUseCase, RegisterDeviceInput,
    RegisterDeviceUseCase, UpdateLocationInput, UpdateLocationUseCase,
};

// ── POST /api/device/register ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterDeviceRequest {
    pub ieda: String,
    pub username: Option<String>,
}

#[derive(Serialize)]
pub struct RegisterDeviceResponse {
    pub status: &'static str,
    pub registration_code: String,
    pub device_exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_user: Option<String>,
    pub message: String,
}

pub async fn register_device(
    State(state): State<AppState>,
    Json(body): Json<RegisterDeviceRequest>,
) -> Result<Json<RegisterDeviceResponse>, RegistryServiceError> {
    let usecase = RegisterDeviceUseCase {
        devices: state.device_repo(),
    };
    let out = usecase
        .execute(RegisterDeviceInput {
            ieda: body.ieda,
            mac_address: None,
        })
        .await?;

    let message = match &body.username {
        Some(username) => format!("Registration code generated for user {username}"),
        None => "Registration code generated successfully".to_owned(),
    };
    Ok(Json(RegisterDeviceResponse {
        status: "success",
        registration_code: out.registration_code,
        device_exists: out.device_exists,
        requested_user: body.username,
        message,
    }))
}

// ── POST /api/device/status ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct DeviceStatusRequest {
    pub ieda: String,
    pub username: Option<String>,
}

#[derive(Serialize)]
pub struct DeviceStatusResponse {
    pub status: &'static str,
    pub registered: bool,
    pub registered_to_user: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rito_id: Option<String>,
    pub registration_code: String,
    pub is_active: bool,
    #[serde(serialize_with = "rito_core::serde::to_rfc3339_ms")]
    pub last_seen: chrono::DateTime<chrono::Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub message: String,
}

pub async fn device_status(
    State(state): State<AppState>,
    Json(body): Json<DeviceStatusRequest>,
) -> Result<Json<DeviceStatusResponse>, RegistryServiceError> {
    let usecase = DeviceStatusUseCase {
        devices: state.device_repo(),
        accounts: state.account_repo(),
        users: state.user_repo(),
    };
    let status = usecase
        .execute(DeviceStatusInput {
            ieda: body.ieda,
            username: body.username,
        })
        .await?;

    Ok(Json(DeviceStatusResponse {
        status: "success",
        registered: status.registered,
        registered_to_user: status.registered_to_user,
        rito_id: status.rito_id,
        registration_code: status.registration_code,
        is_active: status.is_active,
        last_seen: status.last_seen,
        username: status.bound_username,
        message: status.message,
    }))
}

// ── POST /api/device/location ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateLocationRequest {
    pub ieda: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub ip_address: Option<String>,
    pub username: Option<String>,
}

#[derive(Serialize)]
pub struct LocationDetails {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub city: Option<String>,
    pub country: Option<String>,
}

#[derive(Serialize)]
pub struct UpdateLocationResponse {
    pub status: &'static str,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationDetails>,
}

pub async fn update_location(
    State(state): State<AppState>,
    Json(body): Json<UpdateLocationRequest>,
) -> Result<Json<UpdateLocationResponse>, RegistryServiceError> {
    let usecase = UpdateLocationUseCase {
        devices: state.device_repo(),
        geo: state.geo.clone(),
    };
    let result = usecase
        .execute(UpdateLocationInput {
            ieda: body.ieda,
            latitude: body.latitude,
            longitude: body.longitude,
            ip_address: body.ip_address,
        })
        .await?;

    Ok(Json(UpdateLocationResponse {
        status: "success",
        message: "Location updated successfully",
        user: body.username,
        location: result.location.map(|loc| LocationDetails {
            latitude: loc.latitude,
            longitude: loc.longitude,
            city: loc.city,
            country: loc.country,
        }),
    }))
}

// ── POST /api/device/refresh-code ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RefreshCodeRequest {
    pub ieda: String,
}

#[derive(Serialize)]
pub struct RefreshCodeResponse {
    pub status: &'static str,
    pub registration_code: String,
    pub message: &'static str,
}

pub async fn refresh_code(
    State(state): State<AppState>,
    Json(body): Json<RefreshCodeRequest>,
) -> Result<Json<RefreshCodeResponse>, RegistryServiceError> {
    let usecase = RefreshCodeUseCase {
        devices: state.device_repo(),
    };
    let code = usecase.execute(&body.ieda).await?;
    Ok(Json(RefreshCodeResponse {
        status: "success",
        registration_code: code,
        message: "Registration code refreshed successfully",
    }))
}

// ── GET /api/device/{ieda} ───────────────────────────────────────────────────

#[derive(Serialize)]
pub struct DeviceAccountResponse {
    pub status: &'static str,
    pub rito_id: String,
    pub message: String,
}

pub async fn device_account(
    State(state): State<AppState>,
    Path(ieda): Path<String>,
) -> Result<Json<DeviceAccountResponse>, RegistryServiceError> {
    let usecase = LookupAccountUseCase {
        devices: state.device_repo(),
        accounts: state.account_repo(),
        socials: state.social_repo(),
    };
    let lookup = usecase.execute(&ieda).await?;

    let platforms = if lookup.platforms.is_empty() {
        "None".to_owned()
    } else {
        lookup
            .platforms
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    Ok(Json(DeviceAccountResponse {
        status: "success",
        rito_id: lookup.account.rito_id,
        message: format!("Registered platforms: {platforms}"),
    }))
}
