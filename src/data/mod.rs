//! Database repository layer for all domain entities.
//!
//! Repositories use SeaORM entity models internally and return domain models from
//! `crate::model`, keeping database structures out of the service and bot layers.

pub mod clan;
pub mod faq;
pub mod modmail;
pub mod temp_voice;
pub mod ticket;

#[cfg(test)]
mod test;
