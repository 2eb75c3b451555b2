//! Claim aggregate

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::ClaimId;
use crate::error::ClaimError;

/// Claim status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimStatus {
    /// Submitted and awaiting a decision
    Pending,
    /// Approved for payment
    Approved,
    /// Rejected by the reviewer
    Rejected,
}

impl ClaimStatus {
    /// Returns the canonical name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Pending => "Pending",
            ClaimStatus::Approved => "Approved",
            ClaimStatus::Rejected => "Rejected",
        }
    }

    /// Terminal states have no outgoing transition
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ClaimStatus::Pending)
    }
}

impl Default for ClaimStatus {
    fn default() -> Self {
        ClaimStatus::Pending
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(ClaimStatus::Pending),
            "approved" => Ok(ClaimStatus::Approved),
            "rejected" => Ok(ClaimStatus::Rejected),
            other => Err(format!("unknown claim status '{}'", other)),
        }
    }
}

/// A candidate claim as received from the submitter
///
/// Nothing here has been checked yet. Any `status` supplied by the caller is
/// ignored: accepted claims always start as `Pending`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClaimSubmission {
    /// Caller-assigned identifier, if any
    pub id: Option<ClaimId>,
    pub lecturer_name: String,
    pub notes: String,
    pub supporting_document_path: String,
    pub hours_worked: Decimal,
    pub hourly_rate: Decimal,
    /// Requested status, overwritten on acceptance
    pub status: Option<ClaimStatus>,
}

/// A validated claim ready to be handed to the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewClaim {
    pub id: Option<ClaimId>,
    pub lecturer_name: String,
    pub notes: String,
    pub supporting_document_path: String,
    pub hours_worked: Decimal,
    pub hourly_rate: Decimal,
    pub status: ClaimStatus,
}

impl NewClaim {
    /// Builds the record to persist from an accepted submission
    pub(crate) fn accepted(submission: ClaimSubmission) -> Self {
        Self {
            id: submission.id,
            lecturer_name: submission.lecturer_name.trim().to_string(),
            notes: submission.notes.trim().to_string(),
            supporting_document_path: submission.supporting_document_path.trim().to_string(),
            hours_worked: submission.hours_worked,
            hourly_rate: submission.hourly_rate,
            status: ClaimStatus::Pending,
        }
    }

    /// Materialises the stored claim once the store has fixed the identifier
    pub fn into_claim(self, id: ClaimId, submitted_at: DateTime<Utc>) -> Claim {
        Claim {
            id,
            lecturer_name: self.lecturer_name,
            notes: self.notes,
            supporting_document_path: self.supporting_document_path,
            status: self.status,
            hours_worked: self.hours_worked,
            hourly_rate: self.hourly_rate,
            submitted_at,
        }
    }
}

/// A lecturer's claim for hours worked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    /// Unique identifier
    pub id: ClaimId,
    /// Lecturer who worked the hours
    pub lecturer_name: String,
    /// Free-form description of the work
    pub notes: String,
    /// Where the supporting document was stored
    pub supporting_document_path: String,
    /// Status
    pub status: ClaimStatus,
    /// Hours worked
    pub hours_worked: Decimal,
    /// Rate per hour
    pub hourly_rate: Decimal,
    /// When the store accepted the claim
    pub submitted_at: DateTime<Utc>,
}

impl Claim {
    /// Amount payable for the claim
    pub fn total_amount(&self) -> Decimal {
        self.hours_worked * self.hourly_rate
    }

    pub fn is_pending(&self) -> bool {
        self.status == ClaimStatus::Pending
    }

    /// Moves the claim to `target`
    ///
    /// Only `Pending` claims can be decided. Re-asserting the status a
    /// decided claim already has is accepted and leaves it untouched.
    pub fn transition_to(&mut self, target: ClaimStatus) -> Result<(), ClaimError> {
        if !self.can_transition_to(target) {
            return Err(ClaimError::InvalidStatusTransition {
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        Ok(())
    }

    fn can_transition_to(&self, target: ClaimStatus) -> bool {
        use ClaimStatus::*;
        matches!(
            (self.status, target),
            (Pending, Approved) |
            (Pending, Rejected) |
            (Approved, Approved) |
            (Rejected, Rejected)
        )
    }
}
