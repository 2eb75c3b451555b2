//! Lecturer Claims Domain
//!
//! This crate implements the lifecycle of a lecturer's work-hours claim:
//! submission with a supporting document, review of pending claims, and the
//! approval or rejection decision.
//!
//! # Claim Lifecycle
//!
//! ```text
//! submit -> Pending -> Approved
//!                  \-> Rejected
//! ```
//!
//! Persistence is reached only through the [`ClaimStore`] port, so the
//! workflow runs unchanged against PostgreSQL or the in-memory adapter.

pub mod claim;
pub mod document;
pub mod validation;
pub mod ports;
pub mod memory;
pub mod service;
pub mod error;

pub use claim::{Claim, ClaimStatus, ClaimSubmission, NewClaim};
pub use document::{DocumentPolicy, DocumentUpload};
pub use validation::{ClaimValidator, ValidationErrors};
pub use ports::{ClaimQuery, ClaimStore};
pub use memory::InMemoryClaimStore;
pub use service::ClaimWorkflowService;
pub use error::ClaimError;
