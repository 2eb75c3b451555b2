//! Claims Domain Ports
//!
//! This module defines the storage port for the claims domain, so the
//! workflow can run against PostgreSQL in production and an in-memory store
//! in tests.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_claims::{ClaimStore, ClaimWorkflowService, InMemoryClaimStore};
//! use std::sync::Arc;
//!
//! let store: Arc<dyn ClaimStore> = Arc::new(InMemoryClaimStore::new());
//! let service = ClaimWorkflowService::new(store);
//! ```
//!
//! # Configuration
//!
//! The adapter is chosen at application startup:
//!
//! ```rust,ignore
//! let store: Arc<dyn ClaimStore> = match config.store_backend {
//!     StoreBackend::Memory => Arc::new(InMemoryClaimStore::new()),
//!     StoreBackend::Postgres => Arc::new(PgClaimStore::new(pool)),
//! };
//! ```

use async_trait::async_trait;

use core_kernel::{ClaimId, DomainPort, HealthCheckable, PortError};

use crate::claim::{Claim, ClaimStatus, NewClaim};

/// Query parameters for listing claims
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClaimQuery {
    /// Filter by status
    pub status: Option<ClaimStatus>,
}

impl ClaimQuery {
    /// Matches every claim
    pub fn all() -> Self {
        Self::default()
    }

    /// Creates a query to find claims in a status
    pub fn by_status(status: ClaimStatus) -> Self {
        Self {
            status: Some(status),
        }
    }

    /// Checks a claim against the query
    pub fn matches(&self, claim: &Claim) -> bool {
        self.status.map_or(true, |status| claim.status == status)
    }
}

/// The storage port for claim records
///
/// Implementations own all persisted claim state. Results of `list` are in
/// insertion order.
#[async_trait]
pub trait ClaimStore: DomainPort + HealthCheckable {
    /// Persists a new claim
    ///
    /// # Returns
    ///
    /// The stored claim. When `claim.id` is `None` the store assigns one;
    /// an id that is already taken yields `PortError::Conflict`.
    async fn create(&self, claim: NewClaim) -> Result<Claim, PortError>;

    /// Retrieves a claim by ID, `None` if absent
    async fn find_by_id(&self, id: ClaimId) -> Result<Option<Claim>, PortError>;

    /// Lists the claims matching the query
    async fn list(&self, query: ClaimQuery) -> Result<Vec<Claim>, PortError>;

    /// Overwrites a stored claim
    ///
    /// Returns `PortError::NotFound` if no claim has `claim.id`.
    async fn update(&self, claim: &Claim) -> Result<(), PortError>;

    /// Removes a claim; removing an absent claim succeeds
    async fn delete(&self, id: ClaimId) -> Result<(), PortError>;
}
