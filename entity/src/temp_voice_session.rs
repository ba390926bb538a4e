use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "temp_voice_session")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub voice_channel_id: String,
    pub guild_id: String,
    pub owner_id: String,
    pub interface_channel_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
