use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::error::RegistryServiceError;
use crate::state::AppState;
use crate::usecase::account::ListUserDevicesUseCase;
use crate::usecase::user::{CreateUserInput, CreateUserUseCase};

// ── POST /api/users ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
}

#[derive(Serialize)]
pub struct CreateUserResponse {
    pub status: &'static str,
    pub username: String,
    pub rito_id: String,
    pub message: &'static str,
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<CreateUserResponse>), RegistryServiceError> {
    let usecase = CreateUserUseCase {
        users: state.user_repo(),
        accounts: state.account_repo(),
    };
    let out = usecase
        .execute(CreateUserInput {
            username: body.username,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateUserResponse {
            status: "success",
            username: out.user.username,
            rito_id: out.rito_id,
            message: "User created successfully",
        }),
    ))
}

// ── GET /api/users/{username}/devices ────────────────────────────────────────

#[derive(Serialize)]
pub struct UserDeviceInfo {
    pub ieda: String,
    pub rito_id: String,
    pub registration_code: String,
    pub is_active: bool,
    #[serde(serialize_with = "rito_core::serde::to_rfc3339_ms")]
    pub last_seen: chrono::DateTime<chrono::Utc>,
}

#[derive(Serialize)]
pub struct UserDevicesResponse {
    pub status: &'static str,
    pub username: String,
    pub devices: Vec<UserDeviceInfo>,
    pub device_count: usize,
    pub message: String,
}

pub async fn list_user_devices(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<UserDevicesResponse>, RegistryServiceError> {
    let usecase = ListUserDevicesUseCase {
        users: state.user_repo(),
        accounts: state.account_repo(),
        devices: state.device_repo(),
    };
    let devices: Vec<UserDeviceInfo> = usecase
        .execute(&username)
        .await?
        .into_iter()
        .map(|entry| UserDeviceInfo {
            ieda: entry.ieda,
            rito_id: entry.rito_id,
            registration_code: entry.registration_code,
            is_active: entry.is_active,
            last_seen: entry.last_seen,
        })
        .collect();

    let message = format!("Found {} devices for user {username}", devices.len());
    Ok(Json(UserDevicesResponse {
        status: "success",
        device_count: devices.len(),
        username,
        devices,
        message,
    }))
}
