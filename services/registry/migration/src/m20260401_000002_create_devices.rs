use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Devices::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Devices::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Devices::Ieda)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Devices::MacAddress)
                            .string_len(17)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Devices::RegistrationCode)
                            .string_len(6)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Devices::IsActive)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Devices::RegisteredAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Devices::LastSeen)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Devices::IpAddress).string_len(45))
                    .col(ColumnDef::new(Devices::Latitude).double())
                    .col(ColumnDef::new(Devices::Longitude).double())
                    .col(ColumnDef::new(Devices::City).string_len(100))
                    .col(ColumnDef::new(Devices::Country).string_len(100))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Devices::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Devices {
    Table,
    Id,
    Ieda,
    MacAddress,
    RegistrationCode,
    IsActive,
    RegisteredAt,
    LastSeen,
    IpAddress,
    Latitude,
    Longitude,
    City,
    Country,
}
