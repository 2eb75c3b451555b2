//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use core_kernel::ClaimId;
use domain_claims::{ClaimStatus, ClaimSubmission, DocumentUpload};
use fake::faker::name::en::Name;
use fake::Fake;
use rust_decimal::Decimal;

use crate::fixtures::{ClaimFixtures, DocumentFixtures};

/// Builder for claim submissions, valid unless told otherwise
pub struct ClaimSubmissionBuilder {
    id: Option<ClaimId>,
    lecturer_name: String,
    notes: String,
    supporting_document_path: String,
    hours_worked: Decimal,
    hourly_rate: Decimal,
    status: Option<ClaimStatus>,
}

impl Default for ClaimSubmissionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimSubmissionBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            id: None,
            lecturer_name: ClaimFixtures::lecturer_name().to_string(),
            notes: ClaimFixtures::notes().to_string(),
            supporting_document_path: ClaimFixtures::supporting_document_path().to_string(),
            hours_worked: ClaimFixtures::hours_worked(),
            hourly_rate: ClaimFixtures::hourly_rate(),
            status: None,
        }
    }

    /// Creates a valid submission with a caller-assigned id
    pub fn valid(id: i64) -> Self {
        Self::new().with_id(id)
    }

    /// Sets the caller-assigned id
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(ClaimId::new(id));
        self
    }

    /// Sets the lecturer name
    pub fn with_lecturer_name(mut self, name: impl Into<String>) -> Self {
        self.lecturer_name = name.into();
        self
    }

    /// Uses a randomly generated lecturer name
    pub fn with_random_lecturer(mut self) -> Self {
        self.lecturer_name = Name().fake();
        self
    }

    /// Sets the notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Sets the supporting document path
    pub fn with_supporting_document_path(mut self, path: impl Into<String>) -> Self {
        self.supporting_document_path = path.into();
        self
    }

    /// Sets the hours worked
    pub fn with_hours_worked(mut self, hours: Decimal) -> Self {
        self.hours_worked = hours;
        self
    }

    /// Sets the hourly rate
    pub fn with_hourly_rate(mut self, rate: Decimal) -> Self {
        self.hourly_rate = rate;
        self
    }

    /// Sets the status the submitter asks for
    pub fn with_status(mut self, status: ClaimStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Builds the submission
    pub fn build(self) -> ClaimSubmission {
        ClaimSubmission {
            id: self.id,
            lecturer_name: self.lecturer_name,
            notes: self.notes,
            supporting_document_path: self.supporting_document_path,
            hours_worked: self.hours_worked,
            hourly_rate: self.hourly_rate,
            status: self.status,
        }
    }
}

/// Builder for document descriptors
pub struct DocumentUploadBuilder {
    file_name: String,
    size_bytes: u64,
}

impl Default for DocumentUploadBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentUploadBuilder {
    /// Creates a new builder for a small valid PDF
    pub fn new() -> Self {
        let pdf = DocumentFixtures::valid_pdf();
        Self {
            file_name: pdf.file_name,
            size_bytes: pdf.size_bytes,
        }
    }

    /// Sets the file name
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    /// Sets the size in bytes
    pub fn with_size(mut self, size_bytes: u64) -> Self {
        self.size_bytes = size_bytes;
        self
    }

    /// Builds the descriptor
    pub fn build(self) -> DocumentUpload {
        DocumentUpload::new(self.file_name, self.size_bytes)
    }
}
