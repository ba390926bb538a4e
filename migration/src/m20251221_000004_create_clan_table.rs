use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Clan::Table)
                    .if_not_exists()
                    .col(string(Clan::Tag).primary_key())
                    .col(string_uniq(Clan::Name))
                    .col(string(Clan::Color))
                    .col(string(Clan::ShortDesc))
                    .col(text(Clan::FullDesc))
                    .col(boolean(Clan::ApprovalRequired))
                    .col(string(Clan::OwnerId))
                    .col(boolean(Clan::Accepted).default(false))
                    .col(
                        timestamp(Clan::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(timestamp(Clan::LastEdit))
                    .col(string_null(Clan::CategoryId))
                    .col(string_null(Clan::AdminRoleId))
                    .col(string_null(Clan::MemberRoleId))
                    .col(string_null(Clan::GeneralTextId))
                    .col(string_null(Clan::AdminTextId))
                    .col(json(Clan::VoiceChannelIds))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Clan::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Clan {
    Table,
    Tag,
    Name,
    Color,
    ShortDesc,
    FullDesc,
    ApprovalRequired,
    OwnerId,
    Accepted,
    CreatedAt,
    LastEdit,
    CategoryId,
    AdminRoleId,
    MemberRoleId,
    GeneralTextId,
    AdminTextId,
    VoiceChannelIds,
}
