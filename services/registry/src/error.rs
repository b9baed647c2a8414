use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Registry service domain error variants.
///
/// Conflicts map to 400 rather than 409 — the device firmware that consumes
/// this API only distinguishes 200/400/404.
#[derive(Debug, thiserror::Error)]
pub enum RegistryServiceError {
    #[error("device not found")]
    DeviceNotFound,
    #[error("user not found")]
    UserNotFound,
    #[error("account not found")]
    AccountNotFound,
    #[error("social account not found")]
    SocialAccountNotFound,
    #[error("ieda is required")]
    MissingIeda,
    #[error("missing data")]
    MissingData,
    #[error("invalid registration code format")]
    InvalidCode,
    #[error("invalid platform")]
    InvalidPlatform,
    // Browser-path variant of UserNotFound: the original portal reported an
    // unknown username on this path as a 400 with the name in the message.
    #[error("user {0} not found")]
    UnknownUser(String),
    #[error("user already exists")]
    UserAlreadyExists,
    // Social-link path variant of DeviceNotFound: that surface only speaks
    // 200/400, so an unregistered device is a 400 with this message.
    #[error("device not registered")]
    DeviceNotRegistered,
    #[error("{0} account already exists")]
    PlatformAlreadyLinked(String),
    #[error("account binding conflict")]
    DuplicateBinding,
    #[error("device already registered")]
    DeviceAlreadyRegistered,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl RegistryServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DeviceNotFound => "DEVICE_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::AccountNotFound => "ACCOUNT_NOT_FOUND",
            Self::SocialAccountNotFound => "SOCIAL_ACCOUNT_NOT_FOUND",
            Self::MissingIeda => "MISSING_IEDA",
            Self::MissingData => "MISSING_DATA",
            Self::InvalidCode => "INVALID_CODE",
            Self::InvalidPlatform => "INVALID_PLATFORM",
            Self::UnknownUser(_) => "UNKNOWN_USER",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::DeviceNotRegistered => "DEVICE_NOT_REGISTERED",
            Self::PlatformAlreadyLinked(_) => "PLATFORM_ALREADY_LINKED",
            Self::DuplicateBinding => "DUPLICATE_BINDING",
            Self::DeviceAlreadyRegistered => "DEVICE_ALREADY_REGISTERED",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for RegistryServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::DeviceNotFound
            | Self::UserNotFound
            | Self::AccountNotFound
            | Self::SocialAccountNotFound => StatusCode::NOT_FOUND,
            Self::MissingIeda
            | Self::MissingData
            | Self::InvalidCode
            | Self::InvalidPlatform
            | Self::UnknownUser(_)
            | Self::UserAlreadyExists
            | Self::DeviceNotRegistered
            | Self::PlatformAlreadyLinked(_)
            | Self::DuplicateBinding
            | Self::DeviceAlreadyRegistered => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "status": "error",
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
