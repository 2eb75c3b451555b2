//! Repository implementations for domain entities
//!
//! Repositories encapsulate SQL queries and map between database rows and
//! domain types.

pub mod claims;

pub use claims::PgClaimStore;
