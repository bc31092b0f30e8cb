//! User directory handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use domain_directory::{UserProfile, UserRole};

use crate::auth::{current_actor, require, TokenClaims};
use crate::dto::accounts::UsersQuery;
use crate::{AppState, error::ApiError};

/// The caller's own profile
pub async fn me(
    State(state): State<AppState>,
    Extension(token): Extension<TokenClaims>,
) -> Result<Json<UserProfile>, ApiError> {
    let workspace = state.workspace.lock().await;
    let actor = current_actor(&workspace, &token)?;

    workspace
        .directory
        .find_by_email(&actor.email)
        .map(|u| Json(u.profile()))
        .ok_or(ApiError::Unauthorized)
}

/// Lists active accounts, optionally of one role
pub async fn list_users(
    State(state): State<AppState>,
    Extension(token): Extension<TokenClaims>,
    Query(query): Query<UsersQuery>,
) -> Result<Json<Vec<UserProfile>>, ApiError> {
    let workspace = state.workspace.lock().await;
    let actor = current_actor(&workspace, &token)?;
    require(&actor, UserRole::can_manage_users, "list accounts")?;

    Ok(Json(
        workspace
            .directory
            .list_active(query.role)
            .into_iter()
            .map(|u| u.profile())
            .collect(),
    ))
}

/// Deactivates an account
pub async fn deactivate_user(
    State(state): State<AppState>,
    Extension(token): Extension<TokenClaims>,
    Path(email): Path<String>,
) -> Result<StatusCode, ApiError> {
    let mut workspace = state.workspace.lock().await;
    let actor = current_actor(&workspace, &token)?;
    require(&actor, UserRole::can_manage_users, "deactivate accounts")?;

    workspace.directory.deactivate(&email)?;
    Ok(StatusCode::NO_CONTENT)
}
