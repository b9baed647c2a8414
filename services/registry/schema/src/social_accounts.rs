use sea_orm::entity::prelude::*;

/// External platform identity attached to a Rito account.
///
/// Unique `(rito_account_id, platform)`: one linked identity per platform
/// per account. Cascade-deleted with the owning account.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "social_accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub rito_account_id: Uuid,
    pub platform: String,
    pub platform_id: String,
    pub username: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::rito_accounts::Entity",
        from = "Column::RitoAccountId",
        to = "super::rito_accounts::Column::Id"
    )]
    RitoAccount,
}

impl Related<super::rito_accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RitoAccount.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
