//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random claim data that
//! either satisfies or deliberately breaks the submission rules.

use domain_claims::{ClaimStatus, ClaimSubmission, DocumentUpload};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::fixtures::ClaimFixtures;

/// Strategy for generating any claim status
pub fn status_strategy() -> impl Strategy<Value = ClaimStatus> {
    prop_oneof![
        Just(ClaimStatus::Pending),
        Just(ClaimStatus::Approved),
        Just(ClaimStatus::Rejected),
    ]
}

/// Strategy for generating non-negative decimals with up to two decimal places
pub fn non_negative_decimal_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000i64, 0u32..3u32).prop_map(|(m, s)| Decimal::new(m, s))
}

/// Strategy for generating strictly negative decimals
pub fn negative_decimal_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64, 0u32..3u32).prop_map(|(m, s)| -Decimal::new(m, s))
}

/// Strategy for generating non-blank text
pub fn non_blank_text_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 .,'-]{0,40}"
}

/// Strategy for file stems without dots
pub fn file_stem_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_-]{1,20}"
}

/// Strategy for file names the default policy accepts
pub fn accepted_file_name_strategy() -> impl Strategy<Value = String> {
    (
        file_stem_strategy(),
        prop_oneof![Just("pdf"), Just("PDF"), Just("docx"), Just("Docx"), Just("xlsx")],
    )
        .prop_map(|(stem, ext)| format!("{}.{}", stem, ext))
}

/// Strategy for file names the default policy rejects
pub fn rejected_file_name_strategy() -> impl Strategy<Value = String> {
    let with_other_extension = (file_stem_strategy(), "[a-z]{1,5}")
        .prop_filter("extension must not be accepted", |(_, ext)| {
            !matches!(ext.as_str(), "pdf" | "docx" | "xlsx")
        })
        .prop_map(|(stem, ext)| format!("{}.{}", stem, ext));

    prop_oneof![
        with_other_extension,
        file_stem_strategy(),
        file_stem_strategy().prop_map(|stem| format!("{}.pdf.txt", stem)),
    ]
}

/// Strategy for documents that satisfy the default policy
pub fn valid_document_strategy() -> impl Strategy<Value = DocumentUpload> {
    (accepted_file_name_strategy(), 1u64..=domain_claims::document::DEFAULT_MAX_DOCUMENT_BYTES)
        .prop_map(|(name, size)| DocumentUpload::new(name, size))
}

/// Strategy for submissions that pass validation, with any requested status
pub fn valid_submission_strategy() -> impl Strategy<Value = ClaimSubmission> {
    (
        non_blank_text_strategy(),
        non_blank_text_strategy(),
        non_negative_decimal_strategy(),
        non_negative_decimal_strategy(),
        proptest::option::of(status_strategy()),
    )
        .prop_map(|(lecturer_name, notes, hours_worked, hourly_rate, status)| ClaimSubmission {
            id: None,
            lecturer_name,
            notes,
            supporting_document_path: ClaimFixtures::supporting_document_path().to_string(),
            hours_worked,
            hourly_rate,
            status,
        })
}
