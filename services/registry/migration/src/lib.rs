use sea_orm_migration::prelude::*;

mod m20260401_000001_create_users;
mod m20260401_000002_create_devices;
mod m20260401_000003_create_rito_accounts;
mod m20260401_000004_create_social_accounts;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260401_000001_create_users::Migration),
            Box::new(m20260401_000002_create_devices::Migration),
            Box::new(m20260401_000003_create_rito_accounts::Migration),
            Box::new(m20260401_000004_create_social_accounts::Migration),
        ]
    }
}
