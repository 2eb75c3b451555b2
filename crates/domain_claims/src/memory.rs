//! In-memory claim store
//!
//! Keeps claims in insertion order behind an async lock. Each instance is
//! fully isolated, which makes it the store of choice for tests and for
//! running the API without a database.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use core_kernel::{ClaimId, DomainPort, HealthCheckResult, HealthCheckable, PortError};

use crate::claim::{Claim, NewClaim};
use crate::ports::{ClaimQuery, ClaimStore};

#[derive(Debug, Default)]
struct Inner {
    claims: Vec<Claim>,
    last_id: i64,
}

/// Claim store backed by process memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryClaimStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryClaimStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with claims, kept in the given order
    pub fn with_claims(claims: impl IntoIterator<Item = Claim>) -> Self {
        let claims: Vec<Claim> = claims.into_iter().collect();
        let last_id = claims.iter().map(|c| c.id.value()).max().unwrap_or(0).max(0);
        Self {
            inner: Arc::new(RwLock::new(Inner { claims, last_id })),
        }
    }

    /// Number of stored claims
    pub async fn len(&self) -> usize {
        self.inner.read().await.claims.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl DomainPort for InMemoryClaimStore {}

#[async_trait]
impl HealthCheckable for InMemoryClaimStore {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult::healthy("memory", 0)
    }
}

#[async_trait]
impl ClaimStore for InMemoryClaimStore {
    async fn create(&self, claim: NewClaim) -> Result<Claim, PortError> {
        let mut inner = self.inner.write().await;

        let id = match claim.id {
            Some(id) => id,
            None => inner
                .last_id
                .checked_add(1)
                .map(ClaimId::new)
                .ok_or_else(|| PortError::conflict("claim id space exhausted"))?,
        };
        if inner.claims.iter().any(|c| c.id == id) {
            return Err(PortError::conflict(format!("claim {} already exists", id)));
        }
        inner.last_id = inner.last_id.max(id.value());

        let stored = claim.into_claim(id, Utc::now());
        inner.claims.push(stored.clone());
        debug!(claim_id = %id, "claim stored in memory");
        Ok(stored)
    }

    async fn find_by_id(&self, id: ClaimId) -> Result<Option<Claim>, PortError> {
        let inner = self.inner.read().await;
        Ok(inner.claims.iter().find(|c| c.id == id).cloned())
    }

    async fn list(&self, query: ClaimQuery) -> Result<Vec<Claim>, PortError> {
        let inner = self.inner.read().await;
        Ok(inner
            .claims
            .iter()
            .filter(|c| query.matches(c))
            .cloned()
            .collect())
    }

    async fn update(&self, claim: &Claim) -> Result<(), PortError> {
        let mut inner = self.inner.write().await;
        let slot = inner
            .claims
            .iter_mut()
            .find(|c| c.id == claim.id)
            .ok_or_else(|| PortError::not_found("Claim", claim.id))?;
        *slot = claim.clone();
        Ok(())
    }

    async fn delete(&self, id: ClaimId) -> Result<(), PortError> {
        let mut inner = self.inner.write().await;
        inner.claims.retain(|c| c.id != id);
        Ok(())
    }
}
