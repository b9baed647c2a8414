use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Registration codes are always exactly 6 ASCII digits.
pub const REGISTRATION_CODE_LEN: usize = 6;

/// Portal user. Sessions and credentials live behind the gateway; the
/// registry only needs the stable username a device can be bound to.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// Physical device identified by its IEDA token.
#[derive(Debug, Clone)]
pub struct Device {
    pub id: Uuid,
    pub ieda: String,
    pub mac_address: String,
    pub registration_code: String,
    pub is_active: bool,
    pub registered_at: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
    pub ip_address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub city: Option<String>,
    pub country: Option<String>,
}

/// Account linking a user to a device under a stable public Rito ID.
#[derive(Debug, Clone)]
pub struct RitoAccount {
    pub id: Uuid,
    pub name: String,
    pub user_id: Option<Uuid>,
    pub device_id: Option<Uuid>,
    pub rito_id: String,
    pub public_key: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// External platform identity attached to a Rito account.
#[derive(Debug, Clone)]
pub struct SocialAccount {
    pub id: Uuid,
    pub rito_account_id: Uuid,
    pub platform: Platform,
    pub platform_id: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// Supported social platforms. Extending the set means adding a variant
/// here and a prefix entry in `identity::generate_username`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Instagram,
    Youtube,
}

impl Platform {
    pub const ALL: [Platform; 2] = [Platform::Instagram, Platform::Youtube];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Instagram => "instagram",
            Self::Youtube => "youtube",
        }
    }

    /// Marketing capitalization, used in user-facing messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Instagram => "Instagram",
            Self::Youtube => "YouTube",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "instagram" => Some(Self::Instagram),
            "youtube" => Some(Self::Youtube),
            _ => None,
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse geolocation resolved from an IP address.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoLocation {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub city: Option<String>,
    pub country: Option<String>,
}

/// Partial location update applied to a device. `None` fields are left
/// untouched; `last_seen` is always refreshed alongside.
#[derive(Debug, Clone, Default)]
pub struct LocationUpdate {
    pub ip_address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub city: Option<String>,
    pub country: Option<String>,
}

/// Validate a caller-supplied registration code: exactly 6 ASCII digits.
pub fn validate_registration_code(code: &str) -> bool {
    code.len() == REGISTRATION_CODE_LEN && code.bytes().all(|b| b.is_ascii_digit())
}
