use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TempVoiceSession::Table)
                    .if_not_exists()
                    .col(string(TempVoiceSession::VoiceChannelId).primary_key())
                    .col(string(TempVoiceSession::GuildId))
                    .col(string(TempVoiceSession::OwnerId))
                    .col(string(TempVoiceSession::InterfaceChannelId))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TempVoiceSession::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TempVoiceSession {
    Table,
    VoiceChannelId,
    GuildId,
    OwnerId,
    InterfaceChannelId,
}
