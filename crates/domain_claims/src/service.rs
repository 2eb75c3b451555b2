//! Claim workflow service
//!
//! Orchestrates submission, review and removal of claims on top of a
//! [`ClaimStore`]. The service holds no per-request state, so a single
//! instance can be shared across all request handlers.

use std::sync::Arc;

use tracing::{info, warn};

use core_kernel::ClaimId;

use crate::claim::{Claim, ClaimStatus, ClaimSubmission, NewClaim};
use crate::document::{DocumentPolicy, DocumentUpload};
use crate::error::ClaimError;
use crate::ports::{ClaimQuery, ClaimStore};
use crate::validation::ClaimValidator;

/// Service for the claim submission and approval workflow
#[derive(Clone)]
pub struct ClaimWorkflowService {
    store: Arc<dyn ClaimStore>,
    validator: ClaimValidator,
}

impl ClaimWorkflowService {
    /// Creates a service using the default document policy
    pub fn new(store: Arc<dyn ClaimStore>) -> Self {
        Self::with_policy(store, DocumentPolicy::default())
    }

    /// Creates a service with an explicit document policy
    pub fn with_policy(store: Arc<dyn ClaimStore>, policy: DocumentPolicy) -> Self {
        Self {
            store,
            validator: ClaimValidator::new(policy),
        }
    }

    pub fn document_policy(&self) -> &DocumentPolicy {
        self.validator.policy()
    }

    pub fn store(&self) -> &Arc<dyn ClaimStore> {
        &self.store
    }

    /// Validates and stores a new claim
    ///
    /// All validation rules run before anything is written. The stored
    /// claim is always `Pending`, whatever status the submission asked for.
    ///
    /// # Errors
    ///
    /// * `ClaimError::ValidationFailed` - one or more rules failed; nothing was stored
    /// * `ClaimError::Persistence` - the store rejected the write
    pub async fn submit_claim(
        &self,
        submission: ClaimSubmission,
        document: &DocumentUpload,
    ) -> Result<Claim, ClaimError> {
        if let Err(errors) = self.validator.validate(&submission, document) {
            warn!(
                lecturer = %submission.lecturer_name,
                document = %document.file_name,
                violations = errors.len(),
                "claim submission rejected"
            );
            return Err(ClaimError::ValidationFailed(errors));
        }

        let claim = self.store.create(NewClaim::accepted(submission)).await?;

        info!(
            claim_id = %claim.id,
            lecturer = %claim.lecturer_name,
            total = %claim.total_amount(),
            "claim submitted"
        );
        Ok(claim)
    }

    /// Lists every claim still awaiting a decision, in store order
    pub async fn list_pending_claims(&self) -> Result<Vec<Claim>, ClaimError> {
        Ok(self.store.list(ClaimQuery::by_status(ClaimStatus::Pending)).await?)
    }

    /// Lists every claim regardless of status, in store order
    pub async fn list_claims(&self) -> Result<Vec<Claim>, ClaimError> {
        self.find_claims(ClaimQuery::all()).await
    }

    /// Lists claims matching a query, in store order
    pub async fn find_claims(&self, query: ClaimQuery) -> Result<Vec<Claim>, ClaimError> {
        Ok(self.store.list(query).await?)
    }

    /// Retrieves a single claim
    pub async fn get_claim(&self, id: ClaimId) -> Result<Claim, ClaimError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(ClaimError::NotFound(id))
    }

    /// Marks a pending claim as approved
    pub async fn approve_claim(&self, id: ClaimId) -> Result<Claim, ClaimError> {
        self.decide(id, ClaimStatus::Approved).await
    }

    /// Marks a pending claim as rejected
    pub async fn reject_claim(&self, id: ClaimId) -> Result<Claim, ClaimError> {
        self.decide(id, ClaimStatus::Rejected).await
    }

    /// Removes a claim; removing an unknown claim is not an error
    pub async fn delete_claim(&self, id: ClaimId) -> Result<(), ClaimError> {
        self.store.delete(id).await?;
        info!(claim_id = %id, "claim deleted");
        Ok(())
    }

    async fn decide(&self, id: ClaimId, target: ClaimStatus) -> Result<Claim, ClaimError> {
        let mut claim = match self.store.find_by_id(id).await? {
            Some(claim) => claim,
            None => {
                warn!(claim_id = %id, status = %target, "claim not found for decision");
                return Err(ClaimError::NotFound(id));
            }
        };

        let previous = claim.status;
        claim.transition_to(target)?;

        if previous != target {
            // The claim can vanish between the read and the write
            self.store.update(&claim).await.map_err(|e| {
                if e.is_not_found() {
                    ClaimError::NotFound(id)
                } else {
                    ClaimError::Persistence(e)
                }
            })?;
        }

        info!(claim_id = %id, from = %previous, to = %target, "claim status updated");
        Ok(claim)
    }
}

impl std::fmt::Debug for ClaimWorkflowService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClaimWorkflowService")
            .field("validator", &self.validator)
            .finish_non_exhaustive()
    }
}
