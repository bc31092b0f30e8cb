//! Sign-in and registration handlers

use axum::{extract::State, http::StatusCode, Json};
use tracing::info;
use validator::Validate;

use domain_directory::UserProfile;

use crate::auth::create_token;
use crate::dto::accounts::*;
use crate::{AppState, error::ApiError};

/// Exchanges email and password for a token
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    request.validate()?;

    let workspace = state.workspace.lock().await;
    let user = workspace.directory.authenticate(&request.email, &request.password)?;
    let token = create_token(&user, &state.config.jwt_secret, state.config.jwt_expiration_secs)?;

    info!(email = %user.email, role = %user.role, "User signed in");
    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.config.jwt_expiration_secs,
        user: user.profile(),
    }))
}

/// Creates a new account
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserProfile>), ApiError> {
    let mut workspace = state.workspace.lock().await;
    let user = workspace.directory.register(request.into_user())?;

    Ok((StatusCode::CREATED, Json(user.profile())))
}
