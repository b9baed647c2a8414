use chrono::Utc;
use uuid::Uuid;

use crate::domain::identity::{generate_platform_id, generate_username};
use crate::domain::repository::{DeviceRepository, RitoAccountRepository, SocialAccountRepository};
use crate::domain::types::{Platform, SocialAccount};
use crate::error::RegistryServiceError;

// ── AttachSocial ─────────────────────────────────────────────────────────────

pub struct AttachSocialInput {
    pub ieda: String,
    pub platform: String,
    pub username: Option<String>,
}

/// Attach a platform identity to the account bound to a device. At most one
/// link per platform per account; username and platform id are generated
/// when the caller does not supply one.
pub struct AttachSocialUseCase<D, A, S>
where
    D: DeviceRepository,
    A: RitoAccountRepository,
    S: SocialAccountRepository,
{
    pub devices: D,
    pub accounts: A,
    pub socials: S,
}

impl<D, A, S> AttachSocialUseCase<D, A, S>
where
    D: DeviceRepository,
    A: RitoAccountRepository,
    S: SocialAccountRepository,
{
    pub async fn execute(
        &self,
        input: AttachSocialInput,
    ) -> Result<SocialAccount, RegistryServiceError> {
        if input.ieda.is_empty() {
            return Err(RegistryServiceError::MissingIeda);
        }

        let platform = Platform::parse(&input.platform)
            .ok_or(RegistryServiceError::InvalidPlatform)?;

        let device = self
            .devices
            .find_by_ieda(&input.ieda)
            .await?
            .ok_or(RegistryServiceError::DeviceNotRegistered)?;

        let account = self
            .accounts
            .find_by_device(device.id)
            .await?
            .ok_or(RegistryServiceError::DeviceNotRegistered)?;

        if self.socials.find(account.id, platform).await?.is_some() {
            return Err(RegistryServiceError::PlatformAlreadyLinked(
                platform.as_str().to_owned(),
            ));
        }

        let username = input
            .username
            .unwrap_or_else(|| generate_username(platform.as_str(), &account.rito_id));

        let social = SocialAccount {
            id: Uuid::now_v7(),
            rito_account_id: account.id,
            platform,
            platform_id: generate_platform_id(platform.as_str()),
            username,
            created_at: Utc::now(),
        };
        self.socials.create(&social).await?;
        Ok(social)
    }
}

// ── DetachSocial ─────────────────────────────────────────────────────────────

/// Remove a platform link from the caller's account. No cascading side
/// effects beyond the delete.
pub struct DetachSocialUseCase<A, S>
where
    A: RitoAccountRepository,
    S: SocialAccountRepository,
{
    pub accounts: A,
    pub socials: S,
}

impl<A, S> DetachSocialUseCase<A, S>
where
    A: RitoAccountRepository,
    S: SocialAccountRepository,
{
    pub async fn execute(
        &self,
        user_id: Uuid,
        platform: &str,
    ) -> Result<(), RegistryServiceError> {
        let platform =
            Platform::parse(platform).ok_or(RegistryServiceError::InvalidPlatform)?;

        let account = self
            .accounts
            .find_by_user(user_id)
            .await?
            .ok_or(RegistryServiceError::AccountNotFound)?;

        if !self.socials.delete(account.id, platform).await? {
            return Err(RegistryServiceError::SocialAccountNotFound);
        }
        Ok(())
    }
}
