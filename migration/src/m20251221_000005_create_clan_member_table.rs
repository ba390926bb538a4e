use sea_orm_migration::{prelude::*, schema::*};

use super::m20251221_000004_create_clan_table::Clan;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ClanMember::Table)
                    .if_not_exists()
                    .col(pk_auto(ClanMember::Id))
                    .col(string(ClanMember::Tag))
                    .col(string(ClanMember::UserId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_clan_member_tag")
                            .from(ClanMember::Table, ClanMember::Tag)
                            .to(Clan::Table, Clan::Tag)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .unique()
                            .name("idx_clan_member_unique")
                            .col(ClanMember::Tag)
                            .col(ClanMember::UserId),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ClanMember::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ClanMember {
    Table,
    Id,
    Tag,
    UserId,
}
