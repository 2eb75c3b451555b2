//! Infrastructure Database Layer
//!
//! This crate provides the PostgreSQL implementation of the claims
//! storage port using SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern: [`PgClaimStore`] implements
//! `domain_claims::ClaimStore`, hiding SQL and row mapping from the domain.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{DatabaseConfig, create_pool, run_migrations, PgClaimStore};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/claims")).await?;
//! run_migrations(&pool).await?;
//! let store = PgClaimStore::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;

pub use pool::{DatabasePool, create_pool, run_migrations, DatabaseConfig};
pub use error::DatabaseError;
pub use repositories::PgClaimStore;
