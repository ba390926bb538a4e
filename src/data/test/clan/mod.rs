use crate::{
    data::clan::{ClanMemberRepository, ClanRepository},
    model::clan::{ClanEdit, ClanResources, CreateClanParam},
};
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod apply_edit;
mod create;
mod delete;
mod get_accepted_page;
mod mark_accepted;
mod member;
mod tag_or_name_taken;

fn param(tag: &str, name: &str) -> CreateClanParam {
    CreateClanParam {
        tag: tag.to_string(),
        name: name.to_string(),
        color: "#FF0000".to_string(),
        description: "We build castles and farms together.".to_string(),
        approval_required: false,
        owner_id: 42,
    }
}
