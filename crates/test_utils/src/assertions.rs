//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for claim types that give
//! more meaningful error messages than standard assertions.

use domain_claims::{Claim, ClaimError, ClaimStatus, ValidationErrors};

/// Asserts that only the status differs between two versions of a claim
///
/// # Panics
///
/// Panics if any field other than `status` changed
pub fn assert_only_status_changed(before: &Claim, after: &Claim) {
    let mut expected = before.clone();
    expected.status = after.status;
    assert_eq!(
        &expected, after,
        "Expected only the status of {} to change",
        before.id
    );
}

/// Asserts that a claim is in the given status
pub fn assert_status(claim: &Claim, status: ClaimStatus) {
    assert_eq!(
        claim.status, status,
        "Expected {} to be {}, got {}",
        claim.id, status, claim.status
    );
}

/// Asserts that every claim in the list is pending
pub fn assert_all_pending(claims: &[Claim]) {
    for claim in claims {
        assert_status(claim, ClaimStatus::Pending);
    }
}

/// Asserts that validation recorded at least one message for a field
pub fn assert_field_error(errors: &ValidationErrors, field: &str) {
    assert!(
        !errors.field(field).is_empty(),
        "Expected a validation error for '{}', got: {}",
        field,
        errors
    );
}

/// Unwraps the validation errors from a failed submission
///
/// # Panics
///
/// Panics if the error is not `ClaimError::ValidationFailed`
pub fn expect_validation_failed(error: ClaimError) -> ValidationErrors {
    match error {
        ClaimError::ValidationFailed(errors) => errors,
        other => panic!("Expected ValidationFailed, got {:?}", other),
    }
}
