use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use rito_core::identity::Identity;

use crate::error::RegistryServiceError;
use crate::state::AppState;
use crate::usecase::social::{AttachSocialInput, AttachSocialUseCase, DetachSocialUseCase};

// ── POST /api/account/social ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AttachSocialRequest {
    pub ieda: String,
    pub platform: String,
    pub username: Option<String>,
}

#[derive(Serialize)]
pub struct AttachSocialResponse {
    pub status: &'static str,
    pub username: String,
    pub message: String,
}

pub async fn attach_social(
    State(state): State<AppState>,
    Json(body): Json<AttachSocialRequest>,
) -> Result<Json<AttachSocialResponse>, RegistryServiceError> {
    let usecase = AttachSocialUseCase {
        devices: state.device_repo(),
        accounts: state.account_repo(),
        socials: state.social_repo(),
    };
    let social = usecase
        .execute(AttachSocialInput {
            ieda: body.ieda,
            platform: body.platform,
            username: body.username,
        })
        .await?;

    let message = format!(
        "{} account created successfully",
        social.platform.display_name()
    );
    Ok(Json(AttachSocialResponse {
        status: "success",
        username: social.username,
        message,
    }))
}

// ── DELETE /api/account/social/{platform} ────────────────────────────────────

pub async fn detach_social(
    identity: Identity,
    State(state): State<AppState>,
    Path(platform): Path<String>,
) -> Result<StatusCode, RegistryServiceError> {
    let usecase = DetachSocialUseCase {
        accounts: state.account_repo(),
        socials: state.social_repo(),
    };
    usecase.execute(identity.user_id, &platform).await?;
    Ok(StatusCode::NO_CONTENT)
}
