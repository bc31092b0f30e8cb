//! Reporting handlers

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Extension, Json,
};

use domain_claims::{Claim, ClaimStatistics};
use domain_directory::UserRole;
use domain_reporting::{
    filter_by_date_range, payment_summary, payments_to_delimited_text, summarize,
    to_delimited_text, ClaimSummary, PaymentSummary,
};

use crate::auth::{current_actor, require, TokenClaims};
use crate::dto::reports::DateRangeQuery;
use crate::{AppState, Workspace, error::ApiError};

/// Claims the caller may report on, narrowed to the requested dates
fn selected<'a>(
    workspace: &'a Workspace,
    token: &TokenClaims,
    range: &DateRangeQuery,
) -> Result<Vec<&'a Claim>, ApiError> {
    let actor = current_actor(workspace, token)?;
    let visible = workspace.claims.visible_to(&actor);

    Ok(match range.period()? {
        Some(period) => filter_by_date_range(visible, &period),
        None => visible,
    })
}

/// Dashboard statistics (staff only)
pub async fn statistics(
    State(state): State<AppState>,
    Extension(token): Extension<TokenClaims>,
) -> Result<Json<ClaimStatistics>, ApiError> {
    let workspace = state.workspace.lock().await;
    let actor = current_actor(&workspace, &token)?;
    require(&actor, UserRole::is_staff, "view statistics")?;

    Ok(Json(workspace.claims.statistics(&workspace.directory)))
}

/// Summary of the caller's visible claims
pub async fn summary(
    State(state): State<AppState>,
    Extension(token): Extension<TokenClaims>,
    Query(range): Query<DateRangeQuery>,
) -> Result<Json<ClaimSummary>, ApiError> {
    let workspace = state.workspace.lock().await;
    let claims = selected(&workspace, &token, &range)?;

    Ok(Json(summarize(claims)))
}

/// CSV export of the caller's visible claims
pub async fn export(
    State(state): State<AppState>,
    Extension(token): Extension<TokenClaims>,
    Query(range): Query<DateRangeQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let workspace = state.workspace.lock().await;
    let claims = selected(&workspace, &token, &range)?;
    let text = to_delimited_text(claims)?;

    Ok(csv_response(text, "claims.csv"))
}

/// Approved claims grouped per lecturer (HR only)
pub async fn payments(
    State(state): State<AppState>,
    Extension(token): Extension<TokenClaims>,
) -> Result<Json<PaymentSummary>, ApiError> {
    let workspace = state.workspace.lock().await;
    let actor = current_actor(&workspace, &token)?;
    require(&actor, UserRole::is_payer, "prepare payments")?;

    Ok(Json(payment_summary(
        workspace.claims.repository().list_approved_for_payment(),
    )))
}

/// Payment file for approved claims (HR only)
pub async fn payments_export(
    State(state): State<AppState>,
    Extension(token): Extension<TokenClaims>,
) -> Result<impl IntoResponse, ApiError> {
    let workspace = state.workspace.lock().await;
    let actor = current_actor(&workspace, &token)?;
    require(&actor, UserRole::is_payer, "export payments")?;

    let text = payments_to_delimited_text(workspace.claims.repository().list_approved_for_payment())?;
    Ok(csv_response(text, "payments.csv"))
}

fn csv_response(text: String, filename: &str) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        text,
    )
}
