use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::error::RegistryServiceError;
use crate::state::AppState;
use crate::usecase::account::{BrowserRegisterInput, BrowserRegisterUseCase};

// ── POST /api/register ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct BrowserRegisterRequest {
    pub ieda: String,
    pub code: String,
    pub username: Option<String>,
}

#[derive(Serialize)]
pub struct BrowserRegisterResponse {
    pub status: &'static str,
    pub rito_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub message: String,
}

pub async fn browser_register(
    State(state): State<AppState>,
    Json(body): Json<BrowserRegisterRequest>,
) -> Result<Json<BrowserRegisterResponse>, RegistryServiceError> {
    let usecase = BrowserRegisterUseCase {
        devices: state.device_repo(),
        accounts: state.account_repo(),
        users: state.user_repo(),
    };
    let out = usecase
        .execute(BrowserRegisterInput {
            ieda: body.ieda,
            code: body.code,
            username: body.username,
        })
        .await?;

    let message = match &out.username {
        Some(username) => format!("Device registered to user {username}"),
        None => "Device registered successfully".to_owned(),
    };
    Ok(Json(BrowserRegisterResponse {
        status: "success",
        rito_id: out.rito_id,
        username: out.username,
        message,
    }))
}
