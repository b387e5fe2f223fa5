//! Spiritual Connect server - REST API over the festival calendar
//!
//! This crate provides the HTTP layer for Spiritual Connect:
//! - Google sign-in with cookie-backed sessions
//! - Festivals, rituals, bhajans and community contributions
//! - Priest Mode narration with ElevenLabs speech synthesis
//! - Document categorization through OpenAI

pub mod categorize;
pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod session;
pub mod speech;
pub mod state;

use axum::{
    http::{header, Method},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::state::AppState;

/// Create the Axum router with all routes
pub fn create_router(state: AppState) -> Router {
    // The session cookie rides on credentialed requests, which rule out
    // wildcard CORS values.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    Router::new()
        .merge(routes::health::routes())
        .merge(routes::auth::routes())
        .merge(routes::user::routes())
        .merge(routes::preferences::routes())
        .merge(routes::festivals::routes())
        .merge(routes::rituals::routes())
        .merge(routes::bhajans::routes())
        .merge(routes::contributions::routes())
        .merge(routes::catalog::routes())
        .merge(routes::synthesize::routes())
        .merge(routes::categorize::routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
