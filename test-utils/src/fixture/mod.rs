//! Test fixtures providing in-memory models without database insertion.
//!
//! Use fixtures for unit tests of business logic that operate on entity models
//! directly. Unlike factories, fixtures never touch the database.
//!
//! ```rust,ignore
//! use test_utils::fixture;
//!
//! let clan = fixture::clan::entity();
//! ```

pub mod clan;

pub use clan::{entity as clan_entity, entity_builder as clan_entity_builder};
