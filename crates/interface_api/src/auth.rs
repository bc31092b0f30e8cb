//! Authentication
//!
//! Tokens carry the caller's email as subject. The role inside a token is
//! informational only; every request re-reads the role from the directory.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use domain_directory::{Actor, User, UserRole};

use crate::error::ApiError;
use crate::Workspace;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (user email)
    pub sub: String,
    /// Role at sign-in
    pub role: UserRole,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

/// Auth errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
}

/// Issues a token for a signed-in user
pub fn create_token(user: &User, secret: &str, expiration_secs: u64) -> Result<String, AuthError> {
    let now = Utc::now();
    let exp = now + Duration::seconds(expiration_secs as i64);

    let claims = TokenClaims {
        sub: user.email.clone(),
        role: user.role,
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::InvalidToken)
}

/// Validates a token
pub fn validate_token(token: &str, secret: &str) -> Result<TokenClaims, AuthError> {
    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::InvalidToken,
    })?;

    Ok(token_data.claims)
}

/// Resolves the token subject to a current actor
///
/// A token for an account that has since been deactivated is rejected.
pub fn current_actor(workspace: &Workspace, claims: &TokenClaims) -> Result<Actor, ApiError> {
    workspace
        .directory
        .resolve_actor(&claims.sub)
        .map_err(|_| ApiError::Unauthorized)
}

/// Fails with `Forbidden` unless the predicate holds for the actor's role
pub fn require(actor: &Actor, allowed: fn(&UserRole) -> bool, action: &str) -> Result<(), ApiError> {
    if allowed(&actor.role) {
        Ok(())
    } else {
        Err(ApiError::Forbidden(format!(
            "{} cannot {}",
            actor.role.display_name(),
            action
        )))
    }
}
