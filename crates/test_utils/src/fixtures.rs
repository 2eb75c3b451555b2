//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for claims and documents. These fixtures
//! are consistent and predictable for unit tests.

use chrono::{DateTime, TimeZone, Utc};
use core_kernel::ClaimId;
use domain_claims::{Claim, ClaimStatus, DocumentUpload, NewClaim};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fixture for claim field values
pub struct ClaimFixtures;

impl ClaimFixtures {
    pub fn lecturer_name() -> &'static str {
        "John Doe"
    }

    pub fn notes() -> &'static str {
        "Some notes"
    }

    pub fn supporting_document_path() -> &'static str {
        "/uploads/sample.pdf"
    }

    pub fn hours_worked() -> Decimal {
        dec!(10)
    }

    pub fn hourly_rate() -> Decimal {
        dec!(20)
    }

    /// Fixed submission timestamp (Jan 15, 2024 09:00 UTC)
    pub fn submitted_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap()
    }

    /// A fully valid stored claim with the given id and status
    pub fn stored(id: i64, status: ClaimStatus) -> Claim {
        Claim {
            id: ClaimId::new(id),
            lecturer_name: Self::lecturer_name().to_string(),
            notes: Self::notes().to_string(),
            supporting_document_path: Self::supporting_document_path().to_string(),
            status,
            hours_worked: Self::hours_worked(),
            hourly_rate: Self::hourly_rate(),
            submitted_at: Self::submitted_at(),
        }
    }

    /// A fully valid stored pending claim
    pub fn pending(id: i64) -> Claim {
        Self::stored(id, ClaimStatus::Pending)
    }

    /// A record ready to hand to a store, with an optional caller-chosen id
    pub fn new_claim(id: Option<i64>) -> NewClaim {
        NewClaim {
            id: id.map(ClaimId::new),
            lecturer_name: Self::lecturer_name().to_string(),
            notes: Self::notes().to_string(),
            supporting_document_path: Self::supporting_document_path().to_string(),
            hours_worked: Self::hours_worked(),
            hourly_rate: Self::hourly_rate(),
            status: ClaimStatus::Pending,
        }
    }
}

/// Fixture for document descriptors
pub struct DocumentFixtures;

impl DocumentFixtures {
    /// A small PDF that passes the default policy
    pub fn valid_pdf() -> DocumentUpload {
        DocumentUpload::new("sample.pdf", 1024)
    }

    /// A text file that the default policy rejects by extension
    pub fn invalid_txt() -> DocumentUpload {
        DocumentUpload::new("invalid.txt", 1024)
    }

    /// A PDF one byte over the default size limit
    pub fn oversized_pdf() -> DocumentUpload {
        DocumentUpload::new(
            "large.pdf",
            domain_claims::document::DEFAULT_MAX_DOCUMENT_BYTES + 1,
        )
    }
}
