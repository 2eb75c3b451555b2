//! Multipart claim uploads
//!
//! Reads the claim form and its supporting document from a multipart body.
//! The document bytes are counted and dropped; only the file name and size
//! are handed to the domain.

use std::collections::HashMap;
use std::str::FromStr;

use axum::extract::Multipart;
use rust_decimal::Decimal;

use core_kernel::ClaimId;
use domain_claims::validation::{
    FIELD_DOCUMENT, FIELD_HOURLY_RATE, FIELD_HOURS_WORKED, FIELD_LECTURER_NAME, FIELD_NOTES,
    FIELD_SUPPORTING_DOCUMENT_PATH,
};
use domain_claims::{ClaimSubmission, ClaimValidator, DocumentUpload, ValidationErrors};

use crate::error::ApiError;

/// Directory prefix for derived document paths
pub const UPLOAD_DIR: &str = "/uploads";

const FIELD_ID: &str = "id";

/// Reduces a client-supplied file name to a safe base name
///
/// Directory components are dropped and only ASCII alphanumerics, `.`,
/// `-` and `_` are kept. Falls back to `upload` when nothing remains.
pub fn sanitized_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();
    let cleaned = cleaned.trim_start_matches('.');

    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Raw claim form as read from the request
#[derive(Debug, Default)]
pub struct ClaimForm {
    fields: HashMap<String, String>,
    document: Option<DocumentUpload>,
}

impl ClaimForm {
    /// Reads every part of the multipart body
    pub async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = ClaimForm::default();

        while let Some(mut field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();

            if name == FIELD_DOCUMENT {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let mut size_bytes: u64 = 0;
                while let Some(chunk) = field.chunk().await? {
                    size_bytes += chunk.len() as u64;
                }
                form.document = Some(DocumentUpload::new(file_name, size_bytes));
            } else {
                let value = field.text().await?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    /// Builds a form from text fields and an optional document
    pub fn from_parts(
        fields: impl IntoIterator<Item = (String, String)>,
        document: Option<DocumentUpload>,
    ) -> Self {
        Self {
            fields: fields.into_iter().collect(),
            document,
        }
    }

    fn text(&self, field: &str) -> String {
        self.fields.get(field).cloned().unwrap_or_default()
    }

    fn decimal(&self, field: &str, label: &str, errors: &mut ValidationErrors) -> Decimal {
        let raw = self.text(field);
        let raw = raw.trim();
        if raw.is_empty() {
            errors.add(field, format!("{} is required", label));
            return Decimal::ZERO;
        }
        match Decimal::from_str(raw) {
            Ok(value) => value,
            Err(_) => {
                errors.add(field, format!("{} must be a number", label));
                Decimal::ZERO
            }
        }
    }

    fn id(&self, errors: &mut ValidationErrors) -> Option<ClaimId> {
        let raw = self.text(FIELD_ID);
        if raw.trim().is_empty() {
            return None;
        }
        match raw.parse::<ClaimId>() {
            Ok(id) => Some(id),
            Err(_) => {
                errors.add(FIELD_ID, "Claim id must be a whole number");
                None
            }
        }
    }

    /// Converts the form into a submission and document descriptor
    ///
    /// Problems the domain cannot see (missing document, unparseable
    /// numbers) are reported together with the domain's own field rules,
    /// so the client still receives every violation in one response.
    pub fn into_submission(
        self,
        validator: &ClaimValidator,
    ) -> Result<(ClaimSubmission, DocumentUpload), ApiError> {
        let mut errors = ValidationErrors::new();

        let id = self.id(&mut errors);
        let hours_worked = self.decimal(FIELD_HOURS_WORKED, "Hours worked", &mut errors);
        let hourly_rate = self.decimal(FIELD_HOURLY_RATE, "Hourly rate", &mut errors);

        let mut supporting_document_path = self.text(FIELD_SUPPORTING_DOCUMENT_PATH);
        if supporting_document_path.trim().is_empty() {
            if let Some(document) = &self.document {
                supporting_document_path =
                    format!("{}/{}", UPLOAD_DIR, sanitized_file_name(&document.file_name));
            }
        }

        let submission = ClaimSubmission {
            id,
            lecturer_name: self.text(FIELD_LECTURER_NAME),
            notes: self.text(FIELD_NOTES),
            supporting_document_path,
            hours_worked,
            hourly_rate,
            status: None,
        };

        match self.document {
            Some(document) if errors.is_empty() => Ok((submission, document)),
            document => {
                match &document {
                    Some(document) => validator.validate_document(document, &mut errors),
                    None => errors.add(FIELD_DOCUMENT, "A supporting document is required"),
                }
                ClaimValidator::validate_fields(&submission, &mut errors);
                Err(ApiError::Validation(errors))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn complete_fields() -> Vec<(String, String)> {
        fields(&[
            ("lecturer_name", "John Doe"),
            ("notes", "Some notes"),
            ("hours_worked", "10"),
            ("hourly_rate", "20.50"),
        ])
    }

    #[test]
    fn sanitized_filename_filters_disallowed_chars() {
        assert_eq!(sanitized_file_name("report (final)!.pdf"), "reportfinal.pdf");
    }

    #[test]
    fn sanitized_filename_strips_directories() {
        assert_eq!(sanitized_file_name("../../etc/passwd.pdf"), "passwd.pdf");
        assert_eq!(sanitized_file_name("C:\\docs\\hours.xlsx"), "hours.xlsx");
    }

    #[test]
    fn sanitized_filename_falls_back_on_empty() {
        assert_eq!(sanitized_file_name("###"), "upload");
        assert_eq!(sanitized_file_name("..."), "upload");
    }

    #[test]
    fn test_document_path_derived_from_file_name() {
        let form = ClaimForm::from_parts(
            complete_fields(),
            Some(DocumentUpload::new("my hours.pdf", 10)),
        );

        let (submission, document) = form.into_submission(&ClaimValidator::default()).unwrap();

        assert_eq!(submission.supporting_document_path, "/uploads/myhours.pdf");
        assert_eq!(submission.hourly_rate, Decimal::new(2050, 2));
        assert_eq!(document.size_bytes, 10);
    }

    #[test]
    fn test_explicit_document_path_is_kept() {
        let mut parts = complete_fields();
        parts.push(("supporting_document_path".to_string(), "/files/a.pdf".to_string()));
        let form = ClaimForm::from_parts(parts, Some(DocumentUpload::new("b.pdf", 1)));

        let (submission, _) = form.into_submission(&ClaimValidator::default()).unwrap();

        assert_eq!(submission.supporting_document_path, "/files/a.pdf");
    }

    #[test]
    fn test_missing_document_reported_with_other_errors() {
        let form = ClaimForm::from_parts(fields(&[("hours_worked", "ten")]), None);

        let err = form.into_submission(&ClaimValidator::default()).unwrap_err();

        match err {
            ApiError::Validation(errors) => {
                assert!(errors.has_field(FIELD_DOCUMENT));
                assert!(errors.has_field(FIELD_HOURS_WORKED));
                assert!(errors.has_field(FIELD_HOURLY_RATE));
                assert!(errors.has_field(FIELD_LECTURER_NAME));
                assert!(errors.has_field(FIELD_SUPPORTING_DOCUMENT_PATH));
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_id_is_a_field_error() {
        let mut parts = complete_fields();
        parts.push(("id".to_string(), "abc".to_string()));
        let form = ClaimForm::from_parts(parts, Some(DocumentUpload::new("b.pdf", 1)));

        match form.into_submission(&ClaimValidator::default()) {
            Err(ApiError::Validation(errors)) => assert!(errors.has_field("id")),
            other => panic!("Expected validation error, got {:?}", other),
        }
    }
}
