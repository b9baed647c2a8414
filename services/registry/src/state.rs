use sea_orm::DatabaseConnection;

use crate::infra::db::{
    DbDeviceRepository, DbRitoAccountRepository, DbSocialAccountRepository, DbUserRepository,
};
use crate::infra::geoip::HttpGeoLookup;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub geo: HttpGeoLookup,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn device_repo(&self) -> DbDeviceRepository {
        DbDeviceRepository {
            db: self.db.clone(),
        }
    }

    pub fn account_repo(&self) -> DbRitoAccountRepository {
        DbRitoAccountRepository {
            db: self.db.clone(),
        }
    }

    pub fn social_repo(&self) -> DbSocialAccountRepository {
        DbSocialAccountRepository {
            db: self.db.clone(),
        }
    }
}
