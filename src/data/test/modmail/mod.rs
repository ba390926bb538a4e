use crate::data::modmail::ModmailRepository;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete_by_user;
mod find;
