use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FaqEntry::Table)
                    .if_not_exists()
                    .col(pk_auto(FaqEntry::Id))
                    .col(string_len(FaqEntry::Question, 100))
                    .col(text(FaqEntry::Answer))
                    .col(string(FaqEntry::AddedBy))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FaqEntry::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum FaqEntry {
    Table,
    Id,
    Question,
    Answer,
    AddedBy,
}
