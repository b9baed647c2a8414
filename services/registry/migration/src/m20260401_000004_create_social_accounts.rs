use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SocialAccounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SocialAccounts::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SocialAccounts::RitoAccountId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SocialAccounts::Platform)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SocialAccounts::PlatformId)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SocialAccounts::Username)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SocialAccounts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SocialAccounts::Table, SocialAccounts::RitoAccountId)
                            .to(RitoAccounts::Table, RitoAccounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One linked identity per platform per account.
        manager
            .create_index(
                Index::create()
                    .name("idx_social_accounts_account_platform")
                    .table(SocialAccounts::Table)
                    .col(SocialAccounts::RitoAccountId)
                    .col(SocialAccounts::Platform)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SocialAccounts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum SocialAccounts {
    Table,
    Id,
    RitoAccountId,
    Platform,
    PlatformId,
    Username,
    CreatedAt,
}

#[derive(Iden)]
enum RitoAccounts {
    Table,
    Id,
}
