use crate::{data::ticket::TicketRepository, model::ticket::TicketStatus};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete;
mod find_active_by_user;
mod set_status;
