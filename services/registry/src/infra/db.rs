use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
};
use uuid::Uuid;

use rito_registry_schema::{devices, rito_accounts, social_accounts, users};

use crate::domain::repository::{
    DeviceRepository, RitoAccountRepository, SocialAccountRepository, UserRepository,
};
use crate::domain::types::{Device, LocationUpdate, Platform, RitoAccount, SocialAccount, User};
use crate::error::RegistryServiceError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RegistryServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, RegistryServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find user by username")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &User) -> Result<(), RegistryServiceError> {
        users::ActiveModel {
            id: Set(user.id),
            username: Set(user.username.clone()),
            created_at: Set(user.created_at),
        }
        .insert(&self.db)
        .await
        .context("create user")?;
        Ok(())
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        created_at: model.created_at,
    }
}

// ── Device repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbDeviceRepository {
    pub db: DatabaseConnection,
}

impl DeviceRepository for DbDeviceRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Device>, RegistryServiceError> {
        let model = devices::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find device by id")?;
        Ok(model.map(device_from_model))
    }

    async fn find_by_ieda(&self, ieda: &str) -> Result<Option<Device>, RegistryServiceError> {
        let model = devices::Entity::find()
            .filter(devices::Column::Ieda.eq(ieda))
            .one(&self.db)
            .await
            .context("find device by ieda")?;
        Ok(model.map(device_from_model))
    }

    async fn create(&self, device: &Device) -> Result<(), RegistryServiceError> {
        devices::ActiveModel {
            id: Set(device.id),
            ieda: Set(device.ieda.clone()),
            mac_address: Set(device.mac_address.clone()),
            registration_code: Set(device.registration_code.clone()),
            is_active: Set(device.is_active),
            registered_at: Set(device.registered_at),
            last_seen: Set(device.last_seen),
            ip_address: Set(device.ip_address.clone()),
            latitude: Set(device.latitude),
            longitude: Set(device.longitude),
            city: Set(device.city.clone()),
            country: Set(device.country.clone()),
        }
        .insert(&self.db)
        .await
        .context("create device")?;
        Ok(())
    }

    async fn set_registration_code(
        &self,
        id: Uuid,
        code: &str,
        is_active: bool,
    ) -> Result<(), RegistryServiceError> {
        devices::ActiveModel {
            id: Set(id),
            registration_code: Set(code.to_owned()),
            is_active: Set(is_active),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set registration code")?;
        Ok(())
    }

    async fn touch_last_seen(
        &self,
        id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<(), RegistryServiceError> {
        devices::ActiveModel {
            id: Set(id),
            last_seen: Set(at),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("touch last_seen")?;
        Ok(())
    }

    async fn store_location(
        &self,
        id: Uuid,
        update: &LocationUpdate,
        at: DateTime<Utc>,
    ) -> Result<(), RegistryServiceError> {
        let mut am = devices::ActiveModel {
            id: Set(id),
            last_seen: Set(at),
            ..Default::default()
        };
        if let Some(ref ip) = update.ip_address {
            am.ip_address = Set(Some(ip.clone()));
        }
        if let Some(lat) = update.latitude {
            am.latitude = Set(Some(lat));
        }
        if let Some(lon) = update.longitude {
            am.longitude = Set(Some(lon));
        }
        if let Some(ref city) = update.city {
            am.city = Set(Some(city.clone()));
        }
        if let Some(ref country) = update.country {
            am.country = Set(Some(country.clone()));
        }
        am.update(&self.db).await.context("store location")?;
        Ok(())
    }
}

fn device_from_model(model: devices::Model) -> Device {
    Device {
        id: model.id,
        ieda: model.ieda,
        mac_address: model.mac_address,
        registration_code: model.registration_code,
        is_active: model.is_active,
        registered_at: model.registered_at,
        last_seen: model.last_seen,
        ip_address: model.ip_address,
        latitude: model.latitude,
        longitude: model.longitude,
        city: model.city,
        country: model.country,
    }
}

// ── Rito account repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRitoAccountRepository {
    pub db: DatabaseConnection,
}

impl RitoAccountRepository for DbRitoAccountRepository {
    async fn find_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<RitoAccount>, RegistryServiceError> {
        let model = rito_accounts::Entity::find()
            .filter(rito_accounts::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .context("find account by user")?;
        Ok(model.map(account_from_model))
    }

    async fn find_by_device(
        &self,
        device_id: Uuid,
    ) -> Result<Option<RitoAccount>, RegistryServiceError> {
        let model = rito_accounts::Entity::find()
            .filter(rito_accounts::Column::DeviceId.eq(device_id))
            .one(&self.db)
            .await
            .context("find account by device")?;
        Ok(model.map(account_from_model))
    }

    async fn rito_id_exists(&self, rito_id: &str) -> Result<bool, RegistryServiceError> {
        let model = rito_accounts::Entity::find()
            .filter(rito_accounts::Column::RitoId.eq(rito_id))
            .one(&self.db)
            .await
            .context("probe rito_id")?;
        Ok(model.is_some())
    }

    async fn create(&self, account: &RitoAccount) -> Result<(), RegistryServiceError> {
        rito_accounts::ActiveModel {
            id: Set(account.id),
            name: Set(account.name.clone()),
            user_id: Set(account.user_id),
            device_id: Set(account.device_id),
            rito_id: Set(account.rito_id.clone()),
            public_key: Set(account.public_key.clone()),
            created_at: Set(account.created_at),
        }
        .insert(&self.db)
        .await
        .context("create rito account")?;
        Ok(())
    }

    async fn set_device(
        &self,
        account_id: Uuid,
        device_id: Uuid,
    ) -> Result<(), RegistryServiceError> {
        rito_accounts::ActiveModel {
            id: Set(account_id),
            device_id: Set(Some(device_id)),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set account device")?;
        Ok(())
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<RitoAccount>, RegistryServiceError> {
        let models = rito_accounts::Entity::find()
            .filter(rito_accounts::Column::UserId.eq(user_id))
            .all(&self.db)
            .await
            .context("list accounts by user")?;
        Ok(models.into_iter().map(account_from_model).collect())
    }
}

fn account_from_model(model: rito_accounts::Model) -> RitoAccount {
    RitoAccount {
        id: model.id,
        name: model.name,
        user_id: model.user_id,
        device_id: model.device_id,
        rito_id: model.rito_id,
        public_key: model.public_key,
        created_at: model.created_at,
    }
}

// ── Social account repository ────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSocialAccountRepository {
    pub db: DatabaseConnection,
}

impl SocialAccountRepository for DbSocialAccountRepository {
    async fn find(
        &self,
        account_id: Uuid,
        platform: Platform,
    ) -> Result<Option<SocialAccount>, RegistryServiceError> {
        let model = social_accounts::Entity::find()
            .filter(social_accounts::Column::RitoAccountId.eq(account_id))
            .filter(social_accounts::Column::Platform.eq(platform.as_str()))
            .one(&self.db)
            .await
            .context("find social account")?;
        model.map(social_from_model).transpose()
    }

    async fn list_by_account(
        &self,
        account_id: Uuid,
    ) -> Result<Vec<SocialAccount>, RegistryServiceError> {
        let models = social_accounts::Entity::find()
            .filter(social_accounts::Column::RitoAccountId.eq(account_id))
            .all(&self.db)
            .await
            .context("list social accounts")?;
        models.into_iter().map(social_from_model).collect()
    }

    async fn create(&self, social: &SocialAccount) -> Result<(), RegistryServiceError> {
        social_accounts::ActiveModel {
            id: Set(social.id),
            rito_account_id: Set(social.rito_account_id),
            platform: Set(social.platform.as_str().to_owned()),
            platform_id: Set(social.platform_id.clone()),
            username: Set(social.username.clone()),
            created_at: Set(social.created_at),
        }
        .insert(&self.db)
        .await
        .context("create social account")?;
        Ok(())
    }

    async fn delete(
        &self,
        account_id: Uuid,
        platform: Platform,
    ) -> Result<bool, RegistryServiceError> {
        let result = social_accounts::Entity::delete_many()
            .filter(social_accounts::Column::RitoAccountId.eq(account_id))
            .filter(social_accounts::Column::Platform.eq(platform.as_str()))
            .exec(&self.db)
            .await
            .context("delete social account")?;
        Ok(result.rows_affected > 0)
    }
}

fn social_from_model(
    model: social_accounts::Model,
) -> Result<SocialAccount, RegistryServiceError> {
    let platform = Platform::parse(&model.platform)
        .with_context(|| format!("unknown platform in social_accounts row: {}", model.platform))?;
    Ok(SocialAccount {
        id: model.id,
        rito_account_id: model.rito_account_id,
        platform,
        platform_id: model.platform_id,
        username: model.username,
        created_at: model.created_at,
    })
}
