#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::types::{
    Device, GeoLocation, LocationUpdate, Platform, RitoAccount, SocialAccount, User,
};
use crate::error::RegistryServiceError;

/// Repository for portal users.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RegistryServiceError>;
    async fn find_by_username(&self, username: &str)
    -> Result<Option<User>, RegistryServiceError>;
    async fn create(&self, user: &User) -> Result<(), RegistryServiceError>;
}

/// Repository for devices.
pub trait DeviceRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Device>, RegistryServiceError>;
    async fn find_by_ieda(&self, ieda: &str) -> Result<Option<Device>, RegistryServiceError>;
    async fn create(&self, device: &Device) -> Result<(), RegistryServiceError>;

    /// Overwrite the registration code and activation flag.
    async fn set_registration_code(
        &self,
        id: Uuid,
        code: &str,
        is_active: bool,
    ) -> Result<(), RegistryServiceError>;

    async fn touch_last_seen(&self, id: Uuid, at: DateTime<Utc>)
    -> Result<(), RegistryServiceError>;

    /// Apply a partial location update and refresh `last_seen`.
    async fn store_location(
        &self,
        id: Uuid,
        update: &LocationUpdate,
        at: DateTime<Utc>,
    ) -> Result<(), RegistryServiceError>;
}

/// Repository for Rito accounts.
pub trait RitoAccountRepository: Send + Sync {
    async fn find_by_user(&self, user_id: Uuid)
    -> Result<Option<RitoAccount>, RegistryServiceError>;
    async fn find_by_device(
        &self,
        device_id: Uuid,
    ) -> Result<Option<RitoAccount>, RegistryServiceError>;

    /// Existence probe backing the Rito ID collision-retry loop.
    async fn rito_id_exists(&self, rito_id: &str) -> Result<bool, RegistryServiceError>;

    async fn create(&self, account: &RitoAccount) -> Result<(), RegistryServiceError>;

    /// Reassign the device link on an existing account.
    async fn set_device(
        &self,
        account_id: Uuid,
        device_id: Uuid,
    ) -> Result<(), RegistryServiceError>;

    /// All accounts owned by a user (at most one given the unique link, but
    /// the device-listing API shape is a list).
    async fn list_by_user(&self, user_id: Uuid)
    -> Result<Vec<RitoAccount>, RegistryServiceError>;
}

/// Repository for social platform links.
pub trait SocialAccountRepository: Send + Sync {
    async fn find(
        &self,
        account_id: Uuid,
        platform: Platform,
    ) -> Result<Option<SocialAccount>, RegistryServiceError>;

    async fn list_by_account(
        &self,
        account_id: Uuid,
    ) -> Result<Vec<SocialAccount>, RegistryServiceError>;

    async fn create(&self, social: &SocialAccount) -> Result<(), RegistryServiceError>;

    /// Delete a platform link. Returns `true` if a row was deleted.
    async fn delete(
        &self,
        account_id: Uuid,
        platform: Platform,
    ) -> Result<bool, RegistryServiceError>;
}

/// Outbound IP→geolocation resolver. Best effort: callers swallow errors,
/// a failed lookup must never fail the request that triggered it.
pub trait GeoLookupPort: Send + Sync {
    async fn resolve(&self, ip: &str) -> Result<Option<GeoLocation>, RegistryServiceError>;
}
