use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RitoAccounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RitoAccounts::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RitoAccounts::Name).string().not_null())
                    // Both links are optional but unique: one account per user,
                    // one account per device.
                    .col(ColumnDef::new(RitoAccounts::UserId).uuid().unique_key())
                    .col(ColumnDef::new(RitoAccounts::DeviceId).uuid().unique_key())
                    .col(
                        ColumnDef::new(RitoAccounts::RitoId)
                            .string_len(20)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(RitoAccounts::PublicKey).text())
                    .col(
                        ColumnDef::new(RitoAccounts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(RitoAccounts::Table, RitoAccounts::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(RitoAccounts::Table, RitoAccounts::DeviceId)
                            .to(Devices::Table, Devices::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RitoAccounts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum RitoAccounts {
    Table,
    Id,
    Name,
    UserId,
    DeviceId,
    RitoId,
    PublicKey,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Devices {
    Table,
    Id,
}
