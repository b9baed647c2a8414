use sea_orm::entity::prelude::*;

/// Portal user record. Session handling lives behind the gateway; the
/// registry only stores the stable identity a device can be bound to.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
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
