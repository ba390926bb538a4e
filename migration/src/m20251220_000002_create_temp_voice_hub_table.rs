use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TempVoiceHub::Table)
                    .if_not_exists()
                    .col(string(TempVoiceHub::GuildId).primary_key())
                    .col(string(TempVoiceHub::ChannelId))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TempVoiceHub::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TempVoiceHub {
    Table,
    GuildId,
    ChannelId,
}
