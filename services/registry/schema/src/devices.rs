use sea_orm::entity::prelude::*;

/// Physical device identified by its IEDA token.
///
/// `ieda` and `mac_address` carry unique indexes — they are the storage-level
/// backstop for the get-or-create race on concurrent registration calls.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "devices")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub ieda: String,
    #[sea_orm(unique)]
    pub mac_address: String,
    pub registration_code: String,
    pub is_active: bool,
    pub registered_at: chrono::DateTime<chrono::Utc>,
    pub last_seen: chrono::DateTime<chrono::Utc>,
    pub ip_address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub city: Option<String>,
    pub country: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::rito_accounts::Entity")]
    RitoAccount,
}

impl Related<super::rito_accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RitoAccount.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
