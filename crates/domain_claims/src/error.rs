//! Claims domain errors

use thiserror::Error;

use core_kernel::{ClaimId, PortError};
use crate::claim::ClaimStatus;
use crate::validation::ValidationErrors;

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Claim validation failed: {0}")]
    ValidationFailed(ValidationErrors),

    #[error("Claim not found: {0}")]
    NotFound(ClaimId),

    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: ClaimStatus, to: ClaimStatus },

    #[error("Persistence error: {0}")]
    Persistence(#[from] PortError),
}

impl ClaimError {
    /// Validation errors carried by a rejected submission
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            ClaimError::ValidationFailed(errors) => Some(errors),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClaimError::NotFound(_))
    }
}
