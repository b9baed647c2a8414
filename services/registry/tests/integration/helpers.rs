use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use rito_registry::domain::repository::{
    DeviceRepository, GeoLookupPort, RitoAccountRepository, SocialAccountRepository,
    UserRepository,
};
use rito_registry::domain::types::{
    Device, GeoLocation, LocationUpdate, Platform, RitoAccount, SocialAccount, User,
};
use rito_registry::error::RegistryServiceError;

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn test_user(username: &str) -> User {
    User {
        id: Uuid::now_v7(),
        username: username.to_owned(),
        created_at: Utc::now(),
    }
}

pub fn test_device(ieda: &str) -> Device {
    let now = Utc::now();
    Device {
        id: Uuid::now_v7(),
        ieda: ieda.to_owned(),
        mac_address: format!("AA:BB:CC:00:11:{:02X}", ieda.len()),
        registration_code: "123456".to_owned(),
        is_active: false,
        registered_at: now,
        last_seen: now,
        ip_address: None,
        latitude: None,
        longitude: None,
        city: None,
        country: None,
    }
}

pub fn test_account(user_id: Option<Uuid>, device_id: Option<Uuid>) -> RitoAccount {
    RitoAccount {
        id: Uuid::now_v7(),
        name: "Test Account".to_owned(),
        user_id,
        device_id,
        rito_id: format!("RITO-{}", &Uuid::new_v4().simple().to_string()[..13]),
        public_key: None,
        created_at: Utc::now(),
    }
}

// ── MockUserRepo ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RegistryServiceError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, RegistryServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create(&self, user: &User) -> Result<(), RegistryServiceError> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }
}

// ── MockDeviceRepo ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockDeviceRepo {
    pub devices: Arc<Mutex<Vec<Device>>>,
}

impl MockDeviceRepo {
    pub fn new(devices: Vec<Device>) -> Self {
        Self {
            devices: Arc::new(Mutex::new(devices)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Shared handle to the internal device list for post-execution inspection.
    pub fn devices_handle(&self) -> Arc<Mutex<Vec<Device>>> {
        Arc::clone(&self.devices)
    }
}

impl DeviceRepository for MockDeviceRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Device>, RegistryServiceError> {
        Ok(self
            .devices
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.id == id)
            .cloned())
    }

    async fn find_by_ieda(&self, ieda: &str) -> Result<Option<Device>, RegistryServiceError> {
        Ok(self
            .devices
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.ieda == ieda)
            .cloned())
    }

    async fn create(&self, device: &Device) -> Result<(), RegistryServiceError> {
        let mut devices = self.devices.lock().unwrap();
        // Mirror the unique index on `ieda`.
        if devices.iter().any(|d| d.ieda == device.ieda) {
            return Err(RegistryServiceError::Internal(anyhow!(
                "duplicate key value violates unique constraint"
            )));
        }
        devices.push(device.clone());
        Ok(())
    }

    async fn set_registration_code(
        &self,
        id: Uuid,
        code: &str,
        is_active: bool,
    ) -> Result<(), RegistryServiceError> {
        let mut devices = self.devices.lock().unwrap();
        if let Some(device) = devices.iter_mut().find(|d| d.id == id) {
            device.registration_code = code.to_owned();
            device.is_active = is_active;
        }
        Ok(())
    }

    async fn touch_last_seen(
        &self,
        id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<(), RegistryServiceError> {
        let mut devices = self.devices.lock().unwrap();
        if let Some(device) = devices.iter_mut().find(|d| d.id == id) {
            device.last_seen = at;
        }
        Ok(())
    }

    async fn store_location(
        &self,
        id: Uuid,
        update: &LocationUpdate,
        at: DateTime<Utc>,
    ) -> Result<(), RegistryServiceError> {
        let mut devices = self.devices.lock().unwrap();
        if let Some(device) = devices.iter_mut().find(|d| d.id == id) {
            device.last_seen = at;
            if let Some(ref ip) = update.ip_address {
                device.ip_address = Some(ip.clone());
            }
            if let Some(lat) = update.latitude {
                device.latitude = Some(lat);
            }
            if let Some(lon) = update.longitude {
                device.longitude = Some(lon);
            }
            if let Some(ref city) = update.city {
                device.city = Some(city.clone());
            }
            if let Some(ref country) = update.country {
                device.country = Some(country.clone());
            }
        }
        Ok(())
    }
}

// ── MockAccountRepo ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockAccountRepo {
    pub accounts: Arc<Mutex<Vec<RitoAccount>>>,
}

impl MockAccountRepo {
    pub fn new(accounts: Vec<RitoAccount>) -> Self {
        Self {
            accounts: Arc::new(Mutex::new(accounts)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn accounts_handle(&self) -> Arc<Mutex<Vec<RitoAccount>>> {
        Arc::clone(&self.accounts)
    }
}

impl RitoAccountRepository for MockAccountRepo {
    async fn find_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<RitoAccount>, RegistryServiceError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.user_id == Some(user_id))
            .cloned())
    }

    async fn find_by_device(
        &self,
        device_id: Uuid,
    ) -> Result<Option<RitoAccount>, RegistryServiceError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.device_id == Some(device_id))
            .cloned())
    }

    async fn rito_id_exists(&self, rito_id: &str) -> Result<bool, RegistryServiceError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .any(|a| a.rito_id == rito_id))
    }

    async fn create(&self, account: &RitoAccount) -> Result<(), RegistryServiceError> {
        let mut accounts = self.accounts.lock().unwrap();
        // Mirror the unique indexes on `rito_id`, `device_id`, and `user_id`.
        let conflict = accounts.iter().any(|a| {
            a.rito_id == account.rito_id
                || (account.device_id.is_some() && a.device_id == account.device_id)
                || (account.user_id.is_some() && a.user_id == account.user_id)
        });
        if conflict {
            return Err(RegistryServiceError::Internal(anyhow!(
                "duplicate key value violates unique constraint"
            )));
        }
        accounts.push(account.clone());
        Ok(())
    }

    async fn set_device(
        &self,
        account_id: Uuid,
        device_id: Uuid,
    ) -> Result<(), RegistryServiceError> {
        let mut accounts = self.accounts.lock().unwrap();
        if let Some(account) = accounts.iter_mut().find(|a| a.id == account_id) {
            account.device_id = Some(device_id);
        }
        Ok(())
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<RitoAccount>, RegistryServiceError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.user_id == Some(user_id))
            .cloned()
            .collect())
    }
}

// ── MockSocialRepo ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockSocialRepo {
    pub socials: Arc<Mutex<Vec<SocialAccount>>>,
}

impl MockSocialRepo {
    pub fn new(socials: Vec<SocialAccount>) -> Self {
        Self {
            socials: Arc::new(Mutex::new(socials)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn socials_handle(&self) -> Arc<Mutex<Vec<SocialAccount>>> {
        Arc::clone(&self.socials)
    }
}

impl SocialAccountRepository for MockSocialRepo {
    async fn find(
        &self,
        account_id: Uuid,
        platform: Platform,
    ) -> Result<Option<SocialAccount>, RegistryServiceError> {
        Ok(self
            .socials
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.rito_account_id == account_id && s.platform == platform)
            .cloned())
    }

    async fn list_by_account(
        &self,
        account_id: Uuid,
    ) -> Result<Vec<SocialAccount>, RegistryServiceError> {
        Ok(self
            .socials
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.rito_account_id == account_id)
            .cloned()
            .collect())
    }

    async fn create(&self, social: &SocialAccount) -> Result<(), RegistryServiceError> {
        self.socials.lock().unwrap().push(social.clone());
        Ok(())
    }

    async fn delete(
        &self,
        account_id: Uuid,
        platform: Platform,
    ) -> Result<bool, RegistryServiceError> {
        let mut socials = self.socials.lock().unwrap();
        let before = socials.len();
        socials.retain(|s| !(s.rito_account_id == account_id && s.platform == platform));
        Ok(socials.len() < before)
    }
}

// ── MockGeoLookup ────────────────────────────────────────────────────────────

/// Scripted geolocation resolver.
pub enum GeoBehavior {
    Resolves(GeoLocation),
    NotFound,
    Fails,
}

pub struct MockGeoLookup {
    pub behavior: GeoBehavior,
}

impl GeoLookupPort for MockGeoLookup {
    async fn resolve(&self, _ip: &str) -> Result<Option<GeoLocation>, RegistryServiceError> {
        match &self.behavior {
            GeoBehavior::Resolves(loc) => Ok(Some(loc.clone())),
            GeoBehavior::NotFound => Ok(None),
            GeoBehavior::Fails => Err(RegistryServiceError::Internal(anyhow!(
                "geolocation service unreachable"
            ))),
        }
    }
}
