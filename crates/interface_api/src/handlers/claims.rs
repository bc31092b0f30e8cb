//! Claims handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use validator::Validate;

use core_kernel::ClaimId;
use domain_claims::{Claim, ClaimLifecycle, ClaimStatus};
use domain_directory::{Actor, UserRole};

use crate::auth::{current_actor, require, TokenClaims};
use crate::dto::claims::*;
use crate::{AppState, error::ApiError};

fn parse_claim_id(raw: &str) -> Result<ClaimId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid claim id: {}", raw)))
}

fn respond(claim: &Claim, actor: &Actor) -> ClaimResponse {
    ClaimResponse::new(claim, ClaimLifecycle::available_to(claim, actor))
}

fn respond_all(claims: Vec<&Claim>, actor: &Actor) -> Json<Vec<ClaimResponse>> {
    Json(claims.into_iter().map(|c| respond(c, actor)).collect())
}

/// Creates a draft claim owned by the caller
pub async fn create_claim(
    State(state): State<AppState>,
    Extension(token): Extension<TokenClaims>,
    Json(request): Json<ClaimRequest>,
) -> Result<(StatusCode, Json<ClaimResponse>), ApiError> {
    let mut workspace = state.workspace.lock().await;
    let actor = current_actor(&workspace, &token)?;

    let claim = workspace.claims.create_draft(&actor, request.into())?;
    Ok((StatusCode::CREATED, Json(respond(&claim, &actor))))
}

/// Replaces the details of the caller's draft
pub async fn edit_claim(
    State(state): State<AppState>,
    Extension(token): Extension<TokenClaims>,
    Path(id): Path<String>,
    Json(request): Json<ClaimRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let id = parse_claim_id(&id)?;
    let mut workspace = state.workspace.lock().await;
    let actor = current_actor(&workspace, &token)?;

    let claim = workspace.claims.edit_draft(&actor, id, request.into())?;
    Ok(Json(respond(&claim, &actor)))
}

/// Gets a claim the caller may see
pub async fn get_claim(
    State(state): State<AppState>,
    Extension(token): Extension<TokenClaims>,
    Path(id): Path<String>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let id = parse_claim_id(&id)?;
    let workspace = state.workspace.lock().await;
    let actor = current_actor(&workspace, &token)?;

    let claim = workspace.claims.view(&actor, id)?;
    Ok(Json(respond(claim, &actor)))
}

/// The caller's own claims
pub async fn my_claims(
    State(state): State<AppState>,
    Extension(token): Extension<TokenClaims>,
) -> Result<Json<Vec<ClaimResponse>>, ApiError> {
    let workspace = state.workspace.lock().await;
    let actor = current_actor(&workspace, &token)?;

    Ok(respond_all(workspace.claims.claims_of(&actor), &actor))
}

/// Every claim (staff only)
pub async fn list_claims(
    State(state): State<AppState>,
    Extension(token): Extension<TokenClaims>,
) -> Result<Json<Vec<ClaimResponse>>, ApiError> {
    let workspace = state.workspace.lock().await;
    let actor = current_actor(&workspace, &token)?;
    require(&actor, UserRole::is_staff, "list every claim")?;

    Ok(respond_all(workspace.claims.repository().list_all(), &actor))
}

/// Claims waiting on review (reviewers only)
pub async fn pending_claims(
    State(state): State<AppState>,
    Extension(token): Extension<TokenClaims>,
) -> Result<Json<Vec<ClaimResponse>>, ApiError> {
    let workspace = state.workspace.lock().await;
    let actor = current_actor(&workspace, &token)?;
    require(&actor, UserRole::is_reviewer, "review claims")?;

    Ok(respond_all(workspace.claims.repository().list_pending(), &actor))
}

/// Approved claims waiting on payment (HR only)
pub async fn payable_claims(
    State(state): State<AppState>,
    Extension(token): Extension<TokenClaims>,
) -> Result<Json<Vec<ClaimResponse>>, ApiError> {
    let workspace = state.workspace.lock().await;
    let actor = current_actor(&workspace, &token)?;
    require(&actor, UserRole::is_payer, "pay claims")?;

    Ok(respond_all(
        workspace.claims.repository().list_approved_for_payment(),
        &actor,
    ))
}

/// Moves a claim to a new status
pub async fn transition_claim(
    State(state): State<AppState>,
    Extension(token): Extension<TokenClaims>,
    Path(id): Path<String>,
    Json(request): Json<TransitionRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let id = parse_claim_id(&id)?;
    let target: ClaimStatus = request.status.parse()?;
    let mut workspace = state.workspace.lock().await;
    let actor = current_actor(&workspace, &token)?;

    let claim = workspace.claims.transition(&actor, id, target)?;
    Ok(Json(respond(&claim, &actor)))
}

/// Pays a batch of approved claims; all or nothing
pub async fn pay_claims(
    State(state): State<AppState>,
    Extension(token): Extension<TokenClaims>,
    Json(request): Json<PaymentRequest>,
) -> Result<Json<PaymentBatchResponse>, ApiError> {
    request.validate()?;
    let ids = request
        .claim_ids
        .iter()
        .map(|raw| parse_claim_id(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let mut workspace = state.workspace.lock().await;
    let actor = current_actor(&workspace, &token)?;

    let batch = workspace.claims.pay_batch(&actor, &ids)?;
    Ok(Json(batch.into()))
}
