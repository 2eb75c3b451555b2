//! Claims DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use domain_claims::{Claim, DocumentPolicy};

#[derive(Debug, Serialize)]
pub struct ClaimResponse {
    pub id: i64,
    pub lecturer_name: String,
    pub notes: String,
    pub supporting_document_path: String,
    pub status: String,
    pub hours_worked: Decimal,
    pub hourly_rate: Decimal,
    pub total_amount: Decimal,
    pub submitted_at: DateTime<Utc>,
}

impl From<Claim> for ClaimResponse {
    fn from(claim: Claim) -> Self {
        Self {
            id: claim.id.value(),
            total_amount: claim.total_amount(),
            status: claim.status.to_string(),
            lecturer_name: claim.lecturer_name,
            notes: claim.notes,
            supporting_document_path: claim.supporting_document_path,
            hours_worked: claim.hours_worked,
            hourly_rate: claim.hourly_rate,
            submitted_at: claim.submitted_at,
        }
    }
}

/// What a client needs to render the submission form
#[derive(Debug, Serialize)]
pub struct SubmissionFormResponse {
    pub fields: Vec<&'static str>,
    pub document_field: &'static str,
    pub allowed_extensions: Vec<String>,
    pub max_document_bytes: u64,
}

impl SubmissionFormResponse {
    pub fn new(policy: &DocumentPolicy) -> Self {
        Self {
            fields: vec![
                "lecturer_name",
                "notes",
                "hours_worked",
                "hourly_rate",
                "supporting_document_path",
            ],
            document_field: "document",
            allowed_extensions: policy.allowed_extensions().to_vec(),
            max_document_bytes: policy.max_size_bytes(),
        }
    }
}

/// Query parameters for listing claims
#[derive(Debug, Default, Deserialize)]
pub struct ListClaimsParams {
    pub status: Option<String>,
}
