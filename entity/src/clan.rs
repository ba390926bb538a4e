use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "clan")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub tag: String,
    #[sea_orm(unique)]
    pub name: String,
    pub color: String,
    pub short_desc: String,
    #[sea_orm(column_type = "Text")]
    pub full_desc: String,
    pub approval_required: bool,
    pub owner_id: String,
    pub accepted: bool,
    pub created_at: DateTimeUtc,
    pub last_edit: DateTimeUtc,
    pub category_id: Option<String>,
    pub admin_role_id: Option<String>,
    pub member_role_id: Option<String>,
    pub general_text_id: Option<String>,
    pub admin_text_id: Option<String>,
    pub voice_channel_ids: Json,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::clan_member::Entity")]
    ClanMember,
}

impl Related<super::clan_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClanMember.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
