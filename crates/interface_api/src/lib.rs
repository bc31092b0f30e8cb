//! HTTP API Layer
//!
//! This crate provides the REST API for the lecturer claims system using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for accounts, claims and reports
//! - **Middleware**: Authentication and audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! The user directory and the claim service sit behind one async mutex. Every
//! request that reads or changes them holds the lock for its whole duration,
//! so registrations, claim updates and status transitions are serialized.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let state = AppState::new(directory, ClaimService::new(), config);
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod auth;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put, delete},
    middleware as axum_middleware,
};
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tower_http::cors::{CorsLayer, Any};

use domain_claims::ClaimService;
use domain_directory::UserDirectory;

use crate::config::ApiConfig;
use crate::middleware::{auth_middleware, audit_middleware};
use crate::handlers::{accounts, claims, health, reports, users};

/// The records every request works on
#[derive(Debug)]
pub struct Workspace {
    pub directory: UserDirectory,
    pub claims: ClaimService,
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub workspace: Arc<Mutex<Workspace>>,
    pub config: ApiConfig,
}

impl AppState {
    pub fn new(directory: UserDirectory, claims: ClaimService, config: ApiConfig) -> Self {
        Self {
            workspace: Arc::new(Mutex::new(Workspace { directory, claims })),
            config,
        }
    }
}

/// Creates the main API router
///
/// # Arguments
///
/// * `state` - Shared records and API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/auth/login", post(accounts::login))
        .route("/auth/register", post(accounts::register));

    // User routes
    let user_routes = Router::new()
        .route("/", get(users::list_users))
        .route("/:email", delete(users::deactivate_user));

    // Claims routes
    let claims_routes = Router::new()
        .route("/", post(claims::create_claim))
        .route("/", get(claims::list_claims))
        .route("/mine", get(claims::my_claims))
        .route("/pending", get(claims::pending_claims))
        .route("/payable", get(claims::payable_claims))
        .route("/payments", post(claims::pay_claims))
        .route("/:id", get(claims::get_claim))
        .route("/:id", put(claims::edit_claim))
        .route("/:id/transitions", post(claims::transition_claim));

    // Report routes
    let report_routes = Router::new()
        .route("/summary", get(reports::summary))
        .route("/export", get(reports::export))
        .route("/payments", get(reports::payments))
        .route("/payments/export", get(reports::payments_export));

    // Protected API routes
    let api_routes = Router::new()
        .route("/me", get(users::me))
        .route("/statistics", get(reports::statistics))
        .nest("/users", user_routes)
        .nest("/claims", claims_routes)
        .nest("/reports", report_routes)
        .layer(axum_middleware::from_fn_with_state(state.clone(), audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
