//! Claims handlers

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};

use core_kernel::ClaimId;
use domain_claims::{ClaimQuery, ClaimStatus, ClaimValidator};

use crate::dto::claims::*;
use crate::upload::ClaimForm;
use crate::{error::ApiError, AppState};

/// Describes the submission form and the document rules
pub async fn submission_form(State(state): State<AppState>) -> Json<SubmissionFormResponse> {
    Json(SubmissionFormResponse::new(state.service.document_policy()))
}

/// Submits a new claim with its supporting document
pub async fn submit_claim(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ClaimResponse>), ApiError> {
    let form = ClaimForm::read(multipart).await?;
    let validator = ClaimValidator::new(state.service.document_policy().clone());
    let (submission, document) = form.into_submission(&validator)?;

    let claim = state.service.submit_claim(submission, &document).await?;

    Ok((StatusCode::CREATED, Json(claim.into())))
}

/// Lists claims, optionally filtered by `?status=`
pub async fn list_claims(
    State(state): State<AppState>,
    Query(params): Query<ListClaimsParams>,
) -> Result<Json<Vec<ClaimResponse>>, ApiError> {
    let query = match params.status.as_deref() {
        Some(raw) => {
            let status: ClaimStatus = raw.parse().map_err(ApiError::BadRequest)?;
            ClaimQuery::by_status(status)
        }
        None => ClaimQuery::all(),
    };

    let claims = state.service.find_claims(query).await?;
    Ok(Json(claims.into_iter().map(Into::into).collect()))
}

/// Lists claims awaiting a decision
pub async fn list_pending_claims(
    State(state): State<AppState>,
) -> Result<Json<Vec<ClaimResponse>>, ApiError> {
    let claims = state.service.list_pending_claims().await?;
    Ok(Json(claims.into_iter().map(Into::into).collect()))
}

/// Gets a claim by ID
pub async fn get_claim(
    State(state): State<AppState>,
    Path(id): Path<ClaimId>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let claim = state.service.get_claim(id).await?;
    Ok(Json(claim.into()))
}

/// Approves a claim
pub async fn approve_claim(
    State(state): State<AppState>,
    Path(id): Path<ClaimId>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let claim = state.service.approve_claim(id).await?;
    Ok(Json(claim.into()))
}

/// Rejects a claim
pub async fn reject_claim(
    State(state): State<AppState>,
    Path(id): Path<ClaimId>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let claim = state.service.reject_claim(id).await?;
    Ok(Json(claim.into()))
}

/// Deletes a claim; deleting an unknown claim still succeeds
pub async fn delete_claim(
    State(state): State<AppState>,
    Path(id): Path<ClaimId>,
) -> Result<StatusCode, ApiError> {
    state.service.delete_claim(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
