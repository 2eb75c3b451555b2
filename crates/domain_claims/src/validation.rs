//! Claim submission validation
//!
//! Every rule runs on every submission; violations are collected per field
//! rather than stopping at the first failure, so the submitter sees all
//! problems at once.
//!
//! # Validation Rules
//!
//! ## Supporting document (`document`)
//! - File name must end in an extension allowed by the [`DocumentPolicy`]
//! - Size must not exceed the policy's maximum
//! - Must not be empty
//!
//! ## Required text
//! - `lecturer_name`, `notes` and `supporting_document_path` must contain
//!   something other than whitespace
//!
//! ## Amounts
//! - `hours_worked` and `hourly_rate` must not be negative

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::claim::ClaimSubmission;
use crate::document::{DocumentPolicy, DocumentUpload};

pub const FIELD_DOCUMENT: &str = "document";
pub const FIELD_LECTURER_NAME: &str = "lecturer_name";
pub const FIELD_NOTES: &str = "notes";
pub const FIELD_SUPPORTING_DOCUMENT_PATH: &str = "supporting_document_path";
pub const FIELD_HOURS_WORKED: &str = "hours_worked";
pub const FIELD_HOURLY_RATE: &str = "hourly_rate";

/// Validation failures keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a violation against a field
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Messages recorded for a field, empty if it passed
    pub fn field(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Total number of violations across all fields
    pub fn len(&self) -> usize {
        self.fields.values().map(Vec::len).sum()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn into_map(self) -> BTreeMap<String, Vec<String>> {
        self.fields
    }

    /// Merges another set of violations into this one
    pub fn merge(&mut self, other: ValidationErrors) {
        for (field, messages) in other.fields {
            self.fields.entry(field).or_default().extend(messages);
        }
    }

    /// Converts to `Ok(())` when nothing was recorded
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.fields {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Validator for claim submissions
///
/// # Examples
///
/// ```rust
/// use domain_claims::{ClaimSubmission, ClaimValidator, DocumentPolicy, DocumentUpload};
///
/// let validator = ClaimValidator::new(DocumentPolicy::default());
/// let result = validator.validate(
///     &ClaimSubmission::default(),
///     &DocumentUpload::new("invalid.txt", 1024),
/// );
///
/// let errors = result.unwrap_err();
/// assert!(!errors.field("document").is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClaimValidator {
    policy: DocumentPolicy,
}

impl ClaimValidator {
    pub fn new(policy: DocumentPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &DocumentPolicy {
        &self.policy
    }

    /// Validates a submission together with its supporting document
    ///
    /// # Returns
    ///
    /// `Ok(())` if every rule passes, otherwise all violations keyed by field
    pub fn validate(
        &self,
        submission: &ClaimSubmission,
        document: &DocumentUpload,
    ) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        self.validate_document(document, &mut errors);
        Self::validate_fields(submission, &mut errors);

        errors.into_result()
    }

    /// Validates the document descriptor against the policy
    pub fn validate_document(&self, document: &DocumentUpload, errors: &mut ValidationErrors) {
        if !self.policy.accepts_extension(document) {
            errors.add(
                FIELD_DOCUMENT,
                format!(
                    "Invalid file type '{}'. Allowed types: {}",
                    document.file_name,
                    self.policy.allowed_extensions().join(", ")
                ),
            );
        }

        if !self.policy.accepts_size(document) {
            errors.add(
                FIELD_DOCUMENT,
                format!(
                    "File size {} bytes exceeds the maximum of {} bytes",
                    document.size_bytes,
                    self.policy.max_size_bytes()
                ),
            );
        } else if document.size_bytes == 0 {
            errors.add(FIELD_DOCUMENT, "Uploaded document is empty");
        }
    }

    /// Validates the text and amount fields of a submission
    pub fn validate_fields(submission: &ClaimSubmission, errors: &mut ValidationErrors) {
        Self::validate_required_text(submission, errors);
        Self::validate_amounts(submission, errors);
    }

    fn validate_required_text(submission: &ClaimSubmission, errors: &mut ValidationErrors) {
        let required = [
            (FIELD_LECTURER_NAME, "Lecturer name", &submission.lecturer_name),
            (FIELD_NOTES, "Notes", &submission.notes),
            (
                FIELD_SUPPORTING_DOCUMENT_PATH,
                "Supporting document path",
                &submission.supporting_document_path,
            ),
        ];

        for (field, label, value) in required {
            if value.trim().is_empty() {
                errors.add(field, format!("{} is required", label));
            }
        }
    }

    fn validate_amounts(submission: &ClaimSubmission, errors: &mut ValidationErrors) {
        let amounts = [
            (FIELD_HOURS_WORKED, "Hours worked", submission.hours_worked),
            (FIELD_HOURLY_RATE, "Hourly rate", submission.hourly_rate),
        ];

        for (field, label, value) in amounts {
            if value < Decimal::ZERO {
                errors.add(field, format!("{} cannot be negative", label));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn valid_submission() -> ClaimSubmission {
        ClaimSubmission {
            id: None,
            lecturer_name: "John Doe".to_string(),
            notes: "Some notes".to_string(),
            supporting_document_path: "/uploads/sample.pdf".to_string(),
            hours_worked: dec!(10),
            hourly_rate: dec!(20),
            status: None,
        }
    }

    #[test]
    fn test_valid_submission_passes() {
        let validator = ClaimValidator::default();
        let document = DocumentUpload::new("sample.pdf", 1024);
        assert!(validator.validate(&valid_submission(), &document).is_ok());
    }

    #[test]
    fn test_violations_are_collected_not_short_circuited() {
        let validator = ClaimValidator::default();
        let submission = ClaimSubmission {
            lecturer_name: "  ".to_string(),
            hourly_rate: dec!(-1),
            ..valid_submission()
        };
        let document = DocumentUpload::new("invalid.txt", DocumentPolicy::default().max_size_bytes() + 1);

        let errors = validator.validate(&submission, &document).unwrap_err();

        assert_eq!(errors.field(FIELD_DOCUMENT).len(), 2);
        assert_eq!(errors.field(FIELD_LECTURER_NAME).len(), 1);
        assert_eq!(errors.field(FIELD_HOURLY_RATE).len(), 1);
        assert!(!errors.has_field(FIELD_NOTES));
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_zero_amounts_are_allowed() {
        let validator = ClaimValidator::default();
        let submission = ClaimSubmission {
            hours_worked: Decimal::ZERO,
            hourly_rate: Decimal::ZERO,
            ..valid_submission()
        };
        assert!(validator
            .validate(&submission, &DocumentUpload::new("a.pdf", 1))
            .is_ok());
    }

    #[test]
    fn test_empty_document_rejected() {
        let validator = ClaimValidator::default();
        let errors = validator
            .validate(&valid_submission(), &DocumentUpload::new("a.pdf", 0))
            .unwrap_err();
        assert_eq!(errors.field(FIELD_DOCUMENT), &["Uploaded document is empty".to_string()]);
    }

    #[test]
    fn test_display_lists_every_violation() {
        let mut errors = ValidationErrors::new();
        errors.add(FIELD_NOTES, "Notes is required");
        errors.add(FIELD_DOCUMENT, "bad");
        assert_eq!(errors.to_string(), "document: bad; notes: Notes is required");
    }

    #[test]
    fn test_merge_appends_messages() {
        let mut a = ValidationErrors::new();
        a.add(FIELD_DOCUMENT, "one");
        let mut b = ValidationErrors::new();
        b.add(FIELD_DOCUMENT, "two");
        a.merge(b);
        assert_eq!(a.field(FIELD_DOCUMENT).len(), 2);
    }
}
