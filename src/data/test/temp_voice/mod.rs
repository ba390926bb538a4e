use crate::{data::temp_voice::TempVoiceRepository, model::temp_voice::TempVoiceSession};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod hub;
mod session;
