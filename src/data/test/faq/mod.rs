use crate::{data::faq::FaqRepository, model::faq::CreateFaqEntryParam};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete;
mod get_all;
