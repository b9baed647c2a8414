use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::identity::generate_registration_code;
use crate::domain::repository::{DeviceRepository, GeoLookupPort, RitoAccountRepository,
    UserRepository};
use crate::domain::types::{Device, GeoLocation, LocationUpdate};
use crate::error::RegistryServiceError;

/// Fallback MAC for devices that register without reporting one: derived
/// from the IEDA so the unique constraint still holds.
fn placeholder_mac(ieda: &str) -> String {
    let head: String = ieda.chars().take(8).collect();
    format!("MAC_{head}")
}

fn new_device(ieda: String, mac_address: Option<String>, code: String, now: DateTime<Utc>) -> Device {
    Device {
        id: Uuid::now_v7(),
        mac_address: mac_address.unwrap_or_else(|| placeholder_mac(&ieda)),
        ieda,
        registration_code: code,
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

// ── RegisterDevice (device path) ─────────────────────────────────────────────

pub struct RegisterDeviceInput {
    pub ieda: String,
    pub mac_address: Option<String>,
}

pub struct RegisterDeviceOutput {
    pub registration_code: String,
    pub device_exists: bool,
}

/// Device-path registration: get-or-create by IEDA. An existing device gets
/// a fresh code and drops back to inactive; a new one is created inactive.
pub struct RegisterDeviceUseCase<D: DeviceRepository> {
    pub devices: D,
}

impl<D: DeviceRepository> RegisterDeviceUseCase<D> {
    pub async fn execute(
        &self,
        input: RegisterDeviceInput,
    ) -> Result<RegisterDeviceOutput, RegistryServiceError> {
        if input.ieda.is_empty() {
            return Err(RegistryServiceError::MissingIeda);
        }

        let code = generate_registration_code();

        if let Some(device) = self.devices.find_by_ieda(&input.ieda).await? {
            self.devices
                .set_registration_code(device.id, &code, false)
                .await?;
            return Ok(RegisterDeviceOutput {
                registration_code: code,
                device_exists: true,
            });
        }

        let device = new_device(input.ieda.clone(), input.mac_address, code.clone(), Utc::now());
        match self.devices.create(&device).await {
            Ok(()) => Ok(RegisterDeviceOutput {
                registration_code: code,
                device_exists: false,
            }),
            Err(create_err) => {
                // Lost the get-or-create race: a concurrent register slipped in
                // between the lookup and the insert. The unique index on `ieda`
                // rejected us; fall through to the refresh path.
                match self.devices.find_by_ieda(&input.ieda).await? {
                    Some(existing) => {
                        self.devices
                            .set_registration_code(existing.id, &code, false)
                            .await?;
                        Ok(RegisterDeviceOutput {
                            registration_code: code,
                            device_exists: true,
                        })
                    }
                    None => Err(create_err),
                }
            }
        }
    }
}

// ── DeviceStatus ─────────────────────────────────────────────────────────────

pub struct DeviceStatusInput {
    pub ieda: String,
    pub username: Option<String>,
}

#[derive(Debug)]
pub struct DeviceStatus {
    pub registered: bool,
    pub registered_to_user: bool,
    pub rito_id: Option<String>,
    pub registration_code: String,
    pub is_active: bool,
    pub last_seen: DateTime<Utc>,
    pub bound_username: Option<String>,
    pub message: String,
}

/// Status probe: touches `last_seen` and reports binding state, optionally
/// verified against a caller-supplied username.
pub struct DeviceStatusUseCase<D, A, U>
where
    D: DeviceRepository,
    A: RitoAccountRepository,
    U: UserRepository,
{
    pub devices: D,
    pub accounts: A,
    pub users: U,
}

impl<D, A, U> DeviceStatusUseCase<D, A, U>
where
    D: DeviceRepository,
    A: RitoAccountRepository,
    U: UserRepository,
{
    pub async fn execute(
        &self,
        input: DeviceStatusInput,
    ) -> Result<DeviceStatus, RegistryServiceError> {
        if input.ieda.is_empty() {
            return Err(RegistryServiceError::MissingIeda);
        }

        let device = self
            .devices
            .find_by_ieda(&input.ieda)
            .await?
            .ok_or(RegistryServiceError::DeviceNotFound)?;

        let now = Utc::now();
        self.devices.touch_last_seen(device.id, now).await?;

        let account = self.accounts.find_by_device(device.id).await?;

        let bound_username = match account.as_ref().and_then(|a| a.user_id) {
            Some(user_id) => self
                .users
                .find_by_id(user_id)
                .await?
                .map(|u| u.username),
            None => None,
        };

        let (registered_to_user, rito_id) = match (&account, &input.username) {
            (Some(acc), Some(requested)) => (
                bound_username.as_deref() == Some(requested.as_str()),
                Some(acc.rito_id.clone()),
            ),
            _ => (false, None),
        };

        let message = if registered_to_user {
            format!(
                "Device registered to user {}",
                input.username.as_deref().unwrap_or_default()
            )
        } else if let (Some(_), Some(actual)) = (&account, &bound_username) {
            format!("Device registered to different user: {actual}")
        } else {
            "Device not registered".to_owned()
        };

        Ok(DeviceStatus {
            registered: account.is_some(),
            registered_to_user,
            rito_id,
            registration_code: device.registration_code,
            is_active: device.is_active,
            last_seen: now,
            bound_username,
            message,
        })
    }
}

// ── UpdateLocation ───────────────────────────────────────────────────────────

pub struct UpdateLocationInput {
    pub ieda: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub ip_address: Option<String>,
}

pub struct LocationResult {
    pub location: Option<GeoLocation>,
}

/// Location update: explicit coordinates win; otherwise an IP is resolved
/// through the geolocation port, and resolver failures are swallowed — the
/// device still gets a success and only `last_seen`/`ip_address` move.
pub struct UpdateLocationUseCase<D, G>
where
    D: DeviceRepository,
    G: GeoLookupPort,
{
    pub devices: D,
    pub geo: G,
}

impl<D, G> UpdateLocationUseCase<D, G>
where
    D: DeviceRepository,
    G: GeoLookupPort,
{
    pub async fn execute(
        &self,
        input: UpdateLocationInput,
    ) -> Result<LocationResult, RegistryServiceError> {
        if input.ieda.is_empty() {
            return Err(RegistryServiceError::MissingIeda);
        }

        let device = self
            .devices
            .find_by_ieda(&input.ieda)
            .await?
            .ok_or(RegistryServiceError::DeviceNotFound)?;

        let mut update = LocationUpdate {
            ip_address: input.ip_address.clone(),
            ..Default::default()
        };

        if let (Some(lat), Some(lon)) = (input.latitude, input.longitude) {
            update.latitude = Some(lat);
            update.longitude = Some(lon);
        } else if let Some(ip) = input.ip_address.as_deref() {
            match self.geo.resolve(ip).await {
                Ok(Some(loc)) => {
                    update.latitude = loc.latitude;
                    update.longitude = loc.longitude;
                    update.city = loc.city;
                    update.country = loc.country;
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(error = %e, ip, "geolocation lookup failed");
                }
            }
        }

        self.devices
            .store_location(device.id, &update, Utc::now())
            .await?;

        // Report the effective coordinates after the merge.
        let latitude = update.latitude.or(device.latitude);
        let longitude = update.longitude.or(device.longitude);
        let location = match (latitude, longitude) {
            (Some(lat), Some(lon)) => Some(GeoLocation {
                latitude: Some(lat),
                longitude: Some(lon),
                city: update.city.or(device.city),
                country: update.country.or(device.country),
            }),
            _ => None,
        };

        Ok(LocationResult { location })
    }
}

// ── RefreshCode ──────────────────────────────────────────────────────────────

/// Unconditional registration-code regeneration for a known device.
pub struct RefreshCodeUseCase<D: DeviceRepository> {
    pub devices: D,
}

impl<D: DeviceRepository> RefreshCodeUseCase<D> {
    pub async fn execute(&self, ieda: &str) -> Result<String, RegistryServiceError> {
        if ieda.is_empty() {
            return Err(RegistryServiceError::MissingIeda);
        }

        let device = self
            .devices
            .find_by_ieda(ieda)
            .await?
            .ok_or(RegistryServiceError::DeviceNotFound)?;

        let code = generate_registration_code();
        self.devices
            .set_registration_code(device.id, &code, device.is_active)
            .await?;
        Ok(code)
    }
}
