//! HTTP API Layer
//!
//! This crate provides the REST interface for the claims pipeline using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: request handlers per role surface (auth, claims, review, HR)
//! - **Middleware**: bearer-token authentication injecting the actor identity
//! - **DTOs**: request/response data transfer objects
//! - **Files**: the attachment byte-storage collaborator
//! - **Export**: CSV rendering for the HR report surfaces
//!
//! All business rules live in the domain crates; handlers translate between
//! HTTP and the core, nothing more.

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod export;
pub mod files;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_claims::ClaimEngine;
use domain_users::UserDirectory;

use crate::config::ApiConfig;
use crate::files::FileStorage;
use crate::handlers::{auth as auth_handlers, claims, health, hr, review};
use crate::middleware::auth_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<UserDirectory>,
    pub engine: Arc<ClaimEngine>,
    pub files: Arc<dyn FileStorage>,
    pub config: ApiConfig,
}

/// Creates the main API router
pub fn create_router(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/auth/register", post(auth_handlers::register))
        .route("/auth/login", post(auth_handlers::login));

    // Claim routes; transition authorization happens inside the engine
    let claim_routes = Router::new()
        .route("/", post(claims::create_claim))
        .route("/mine", get(claims::my_claims))
        .route("/history", get(review::history))
        .route("/:id", get(claims::get_claim))
        .route("/:id/verify", post(review::verify))
        .route("/:id/approve", post(review::approve))
        .route("/:id/reject", post(review::reject))
        .route("/:id/attachments/:stored_as", get(claims::download_attachment));

    // Role dashboard routes
    let dashboard_routes = Router::new()
        .route("/coordinator/queue", get(review::coordinator_queue))
        .route("/manager/queue", get(review::manager_queue))
        .route("/activity", get(review::recent_activity));

    // HR routes
    let hr_routes = Router::new()
        .route("/users", get(hr::list_users))
        .route("/users/export", get(hr::export_lecturers_csv))
        .route("/users/:id", put(hr::update_user))
        .route("/users/:id/approve", post(hr::approve_user))
        .route("/lecturers", post(hr::create_lecturer))
        .route("/overview", get(hr::overview))
        .route("/reports", get(hr::reports))
        .route("/reports/export", get(hr::export_reports_csv));

    // Protected API routes
    let api_routes = Router::new()
        .nest("/claims", claim_routes)
        .merge(dashboard_routes)
        .nest("/hr", hr_routes)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

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
