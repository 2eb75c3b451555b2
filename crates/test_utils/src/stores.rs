//! Instrumented Claim Stores
//!
//! Wrappers around the `ClaimStore` port that let tests observe how the
//! workflow uses its store, or force the store to fail.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use core_kernel::{ClaimId, DomainPort, HealthCheckResult, HealthCheckable, PortError};
use domain_claims::{Claim, ClaimQuery, ClaimStore, InMemoryClaimStore, NewClaim};

/// Call counts recorded by a [`CountingClaimStore`]
#[derive(Debug, Default)]
pub struct StoreCallCounts {
    creates: AtomicUsize,
    finds: AtomicUsize,
    lists: AtomicUsize,
    updates: AtomicUsize,
    deletes: AtomicUsize,
}

impl StoreCallCounts {
    pub fn creates(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn finds(&self) -> usize {
        self.finds.load(Ordering::SeqCst)
    }

    pub fn lists(&self) -> usize {
        self.lists.load(Ordering::SeqCst)
    }

    pub fn updates(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    pub fn deletes(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    /// Total number of calls that write to the store
    pub fn writes(&self) -> usize {
        self.creates() + self.updates() + self.deletes()
    }
}

/// In-memory store that counts every call made to it
#[derive(Debug, Clone, Default)]
pub struct CountingClaimStore {
    inner: InMemoryClaimStore,
    counts: Arc<StoreCallCounts>,
}

impl CountingClaimStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from a pre-populated store
    pub fn with_claims(claims: impl IntoIterator<Item = Claim>) -> Self {
        Self {
            inner: InMemoryClaimStore::with_claims(claims),
            counts: Arc::default(),
        }
    }

    pub fn counts(&self) -> &StoreCallCounts {
        &self.counts
    }

    /// The wrapped store, for inspection without touching the counters
    pub fn inner(&self) -> &InMemoryClaimStore {
        &self.inner
    }
}

impl DomainPort for CountingClaimStore {}

#[async_trait]
impl HealthCheckable for CountingClaimStore {
    async fn health_check(&self) -> HealthCheckResult {
        self.inner.health_check().await
    }
}

#[async_trait]
impl ClaimStore for CountingClaimStore {
    async fn create(&self, claim: NewClaim) -> Result<Claim, PortError> {
        self.counts.creates.fetch_add(1, Ordering::SeqCst);
        self.inner.create(claim).await
    }

    async fn find_by_id(&self, id: ClaimId) -> Result<Option<Claim>, PortError> {
        self.counts.finds.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_id(id).await
    }

    async fn list(&self, query: ClaimQuery) -> Result<Vec<Claim>, PortError> {
        self.counts.lists.fetch_add(1, Ordering::SeqCst);
        self.inner.list(query).await
    }

    async fn update(&self, claim: &Claim) -> Result<(), PortError> {
        self.counts.updates.fetch_add(1, Ordering::SeqCst);
        self.inner.update(claim).await
    }

    async fn delete(&self, id: ClaimId) -> Result<(), PortError> {
        self.counts.deletes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete(id).await
    }
}

/// Store whose every operation fails with a connection error
#[derive(Debug, Clone, Default)]
pub struct FailingClaimStore;

impl FailingClaimStore {
    fn error() -> PortError {
        PortError::connection("claim store unavailable")
    }
}

impl DomainPort for FailingClaimStore {}

#[async_trait]
impl HealthCheckable for FailingClaimStore {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult::unhealthy("failing", 0, "claim store unavailable")
    }
}

#[async_trait]
impl ClaimStore for FailingClaimStore {
    async fn create(&self, _claim: NewClaim) -> Result<Claim, PortError> {
        Err(Self::error())
    }

    async fn find_by_id(&self, _id: ClaimId) -> Result<Option<Claim>, PortError> {
        Err(Self::error())
    }

    async fn list(&self, _query: ClaimQuery) -> Result<Vec<Claim>, PortError> {
        Err(Self::error())
    }

    async fn update(&self, _claim: &Claim) -> Result<(), PortError> {
        Err(Self::error())
    }

    async fn delete(&self, _id: ClaimId) -> Result<(), PortError> {
        Err(Self::error())
    }
}
