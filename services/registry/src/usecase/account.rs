use chrono::Utc;
use uuid::Uuid;

use crate::domain::identity::generate_rito_id;
use crate::domain::repository::{DeviceRepository, RitoAccountRepository, SocialAccountRepository,
    UserRepository};
use crate::domain::types::{Device, Platform, RitoAccount, User, validate_registration_code};
use crate::error::RegistryServiceError;

/// Generate a Rito ID that does not collide with any stored account.
///
/// Check-then-act: not airtight under concurrency, but the collision window
/// is tiny and the unique index on `rito_id` is the actual guarantee — a
/// concurrent duplicate fails the insert instead of corrupting anything.
pub async fn fresh_rito_id<A: RitoAccountRepository>(
    accounts: &A,
) -> Result<String, RegistryServiceError> {
    loop {
        let candidate = generate_rito_id();
        if !accounts.rito_id_exists(&candidate).await? {
            return Ok(candidate);
        }
    }
}

// ── EnsureDefaultAccount ─────────────────────────────────────────────────────

/// Idempotent default-account creation, invoked explicitly from the
/// user-creation workflow. No-op when the user already has an account.
pub struct EnsureDefaultAccountUseCase<A: RitoAccountRepository> {
    pub accounts: A,
}

impl<A: RitoAccountRepository> EnsureDefaultAccountUseCase<A> {
    pub async fn execute(&self, user: &User) -> Result<RitoAccount, RegistryServiceError> {
        if let Some(existing) = self.accounts.find_by_user(user.id).await? {
            return Ok(existing);
        }

        let account = RitoAccount {
            id: Uuid::now_v7(),
            name: user.username.clone(),
            user_id: Some(user.id),
            device_id: None,
            rito_id: fresh_rito_id(&self.accounts).await?,
            public_key: None,
            created_at: Utc::now(),
        };
        self.accounts.create(&account).await?;
        Ok(account)
    }
}

// ── BrowserRegister ──────────────────────────────────────────────────────────

pub struct BrowserRegisterInput {
    pub ieda: String,
    pub code: String,
    pub username: Option<String>,
}

#[derive(Debug)]
pub struct BrowserRegisterOutput {
    pub rito_id: String,
    pub username: Option<String>,
}

/// Browser-path registration: the caller supplies the pairing code shown on
/// the device. The code is format-checked and stored as-is — this path is
/// the pairing confirmation, not a challenge verification. Binding a user
/// who already owns an account reassigns that account's device instead of
/// creating a second row.
pub struct BrowserRegisterUseCase<D, A, U>
where
    D: DeviceRepository,
    A: RitoAccountRepository,
    U: UserRepository,
{
    pub devices: D,
    pub accounts: A,
    pub users: U,
}

impl<D, A, U> BrowserRegisterUseCase<D, A, U>
where
    D: DeviceRepository,
    A: RitoAccountRepository,
    U: UserRepository,
{
    pub async fn execute(
        &self,
        input: BrowserRegisterInput,
    ) -> Result<BrowserRegisterOutput, RegistryServiceError> {
        if input.ieda.is_empty() {
            return Err(RegistryServiceError::MissingIeda);
        }
        if !validate_registration_code(&input.code) {
            return Err(RegistryServiceError::InvalidCode);
        }

        let user = match &input.username {
            Some(username) => Some(
                self.users
                    .find_by_username(username)
                    .await?
                    .ok_or_else(|| RegistryServiceError::UnknownUser(username.clone()))?,
            ),
            None => None,
        };

        let device = match self.devices.find_by_ieda(&input.ieda).await? {
            Some(device) => {
                if self.accounts.find_by_device(device.id).await?.is_some() {
                    return Err(RegistryServiceError::DeviceAlreadyRegistered);
                }
                // Known but unbound device: adopt the caller-supplied code,
                // leave the activation flag as stored.
                self.devices
                    .set_registration_code(device.id, &input.code, device.is_active)
                    .await?;
                device
            }
            None => {
                let now = Utc::now();
                let device = Device {
                    id: Uuid::now_v7(),
                    mac_address: {
                        let head: String = input.ieda.chars().take(8).collect();
                        format!("MAC_{head}")
                    },
                    ieda: input.ieda.clone(),
                    registration_code: input.code.clone(),
                    is_active: false,
                    registered_at: now,
                    last_seen: now,
                    ip_address: None,
                    latitude: None,
                    longitude: None,
                    city: None,
                    country: None,
                };
                self.devices.create(&device).await?;
                device
            }
        };

        let account = match &user {
            Some(user) => match self.accounts.find_by_user(user.id).await? {
                Some(existing) => {
                    // Reassignment, not duplication: one account per user.
                    if let Err(err) = self.accounts.set_device(existing.id, device.id).await {
                        return Err(self.binding_race(device.id, err).await);
                    }
                    existing
                }
                None => {
                    let account = RitoAccount {
                        id: Uuid::now_v7(),
                        name: format!("{}'s Account", user.username),
                        user_id: Some(user.id),
                        device_id: Some(device.id),
                        rito_id: fresh_rito_id(&self.accounts).await?,
                        public_key: None,
                        created_at: Utc::now(),
                    };
                    if let Err(err) = self.accounts.create(&account).await {
                        return Err(self.binding_race(device.id, err).await);
                    }
                    account
                }
            },
            None => {
                let account = RitoAccount {
                    id: Uuid::now_v7(),
                    name: "Default Account".to_owned(),
                    user_id: None,
                    device_id: Some(device.id),
                    rito_id: fresh_rito_id(&self.accounts).await?,
                    public_key: None,
                    created_at: Utc::now(),
                };
                if let Err(err) = self.accounts.create(&account).await {
                    return Err(self.binding_race(device.id, err).await);
                }
                account
            }
        };

        Ok(BrowserRegisterOutput {
            rito_id: account.rito_id,
            username: input.username,
        })
    }

    /// A failed write on the unique device link means a concurrent binder
    /// claimed the device between the unbound check and the insert. Report
    /// that as a binding conflict; anything else propagates unchanged.
    async fn binding_race(
        &self,
        device_id: Uuid,
        err: RegistryServiceError,
    ) -> RegistryServiceError {
        match self.accounts.find_by_device(device_id).await {
            Ok(Some(_)) => RegistryServiceError::DuplicateBinding,
            _ => err,
        }
    }
}

// ── LookupAccount ────────────────────────────────────────────────────────────

pub struct AccountLookup {
    pub account: RitoAccount,
    pub platforms: Vec<Platform>,
}

/// Resolve a device's account and its linked platforms (web status view).
pub struct LookupAccountUseCase<D, A, S>
where
    D: DeviceRepository,
    A: RitoAccountRepository,
    S: SocialAccountRepository,
{
    pub devices: D,
    pub accounts: A,
    pub socials: S,
}

impl<D, A, S> LookupAccountUseCase<D, A, S>
where
    D: DeviceRepository,
    A: RitoAccountRepository,
    S: SocialAccountRepository,
{
    pub async fn execute(&self, ieda: &str) -> Result<AccountLookup, RegistryServiceError> {
        let device = self
            .devices
            .find_by_ieda(ieda)
            .await?
            .ok_or(RegistryServiceError::DeviceNotFound)?;

        let account = self
            .accounts
            .find_by_device(device.id)
            .await?
            .ok_or(RegistryServiceError::AccountNotFound)?;

        let platforms = self
            .socials
            .list_by_account(account.id)
            .await?
            .into_iter()
            .map(|s| s.platform)
            .collect();

        Ok(AccountLookup { account, platforms })
    }
}

// ── ListUserDevices ──────────────────────────────────────────────────────────

pub struct UserDeviceEntry {
    pub ieda: String,
    pub rito_id: String,
    pub registration_code: String,
    pub is_active: bool,
    pub last_seen: chrono::DateTime<Utc>,
}

/// All devices bound to a user's accounts.
pub struct ListUserDevicesUseCase<U, A, D>
where
    U: UserRepository,
    A: RitoAccountRepository,
    D: DeviceRepository,
{
    pub users: U,
    pub accounts: A,
    pub devices: D,
}

impl<U, A, D> ListUserDevicesUseCase<U, A, D>
where
    U: UserRepository,
    A: RitoAccountRepository,
    D: DeviceRepository,
{
    pub async fn execute(
        &self,
        username: &str,
    ) -> Result<Vec<UserDeviceEntry>, RegistryServiceError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(RegistryServiceError::UserNotFound)?;

        let mut entries = Vec::new();
        for account in self.accounts.list_by_user(user.id).await? {
            let Some(device_id) = account.device_id else {
                continue;
            };
            if let Some(device) = self.devices.find_by_id(device_id).await? {
                entries.push(UserDeviceEntry {
                    ieda: device.ieda,
                    rito_id: account.rito_id.clone(),
                    registration_code: device.registration_code,
                    is_active: device.is_active,
                    last_seen: device.last_seen,
                });
            }
        }
        Ok(entries)
    }
}
