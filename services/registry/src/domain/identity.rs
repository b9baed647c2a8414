//! Identifier generation. Pure functions: uniqueness checks (for Rito IDs)
//! are the account binder's job, backed by the storage unique constraints.

use chrono::Utc;
use rand::RngExt;

use crate::domain::types::REGISTRATION_CODE_LEN;

/// Charset for the random part of a Rito ID (uppercase alphanumeric).
const RITO_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate a 6-digit registration code, uniform over digits per position.
/// Codes are scoped per device, so cross-device collisions are fine.
pub fn generate_registration_code() -> String {
    let mut rng = rand::rng();
    (0..REGISTRATION_CODE_LEN)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

/// Generate a Rito ID candidate: `RITO-<ts6>-<rand6>`, where `ts6` is the
/// last six digits of the unix timestamp and `rand6` is uppercase
/// alphanumeric. Callers must existence-check against stored accounts and
/// regenerate on collision.
pub fn generate_rito_id() -> String {
    let timestamp = Utc::now().timestamp().to_string();
    let ts6 = &timestamp[timestamp.len().saturating_sub(6)..];
    let mut rng = rand::rng();
    let rand6: String = (0..6)
        .map(|_| RITO_CHARSET[rng.random_range(0..RITO_CHARSET.len())] as char)
        .collect();
    format!("RITO-{ts6}-{rand6}")
}

/// Derive a platform username from a Rito ID: a 2-letter platform prefix,
/// an underscore, and the first 8 characters of the Rito ID with hyphens
/// stripped. Deterministic; collision risk is accepted.
pub fn generate_username(platform: &str, rito_id: &str) -> String {
    let prefix: String = match platform {
        "instagram" => "ig".to_owned(),
        "youtube" => "yt".to_owned(),
        "twitter" => "tw".to_owned(),
        "facebook" => "fb".to_owned(),
        "linkedin" => "li".to_owned(),
        other => other.chars().take(2).collect(),
    };
    let clean: String = rito_id.chars().filter(|c| *c != '-').take(8).collect();
    format!("{prefix}_{clean}")
}

/// Generate an opaque platform-side identifier: `<platform>_<8 hex chars>`.
pub fn generate_platform_id(platform: &str) -> String {
    let hex = uuid::Uuid::new_v4().simple().to_string();
    format!("{platform}_{}", &hex[..8])
}
