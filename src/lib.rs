//! Chat-session backend: user registration, password login issuing bearer
//! tokens, and per-session message storage.

use axum::{
    Router,
    routing::{get, post},
    middleware::from_fn_with_state,
    extract::DefaultBodyLimit,
};

use http::{HeaderValue, Method, header};
use std::time::Duration;
use tower_http::{
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
    cors::CorsLayer,
};
use tracing::Level;

pub mod config;
pub mod error;
pub mod state;
pub mod db;
pub mod extractors;

pub mod crypto {
    pub mod password;
    pub mod token;
}

pub mod models {
    pub mod user;
    pub mod chat_session;
    pub mod message;
    pub mod page;
    pub mod responses;
}

pub mod repositories {
    pub mod user;
    pub mod chat_session;
    pub mod message;
    pub mod store;
    pub mod memory;
}

pub mod services {
    pub mod auth;
    pub mod chat;
}

pub mod handlers {
    pub mod auth;
    pub mod users;
    pub mod sessions;
}

pub mod middleware_layer {
    pub mod auth;
}

pub mod validation {
    pub mod request;
}

use state::AppState;

/// Request bodies larger than this are rejected before reaching a handler.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Builds the CORS layer for the configured origins. Origins that are not
/// valid header values are skipped with a warning.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("⚠️ Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .max_age(Duration::from_secs(86400))
}

/// Builds the full HTTP application around `state`.
pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/users", post(handlers::users::create_user))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/users", get(handlers::users::list_users))
        .route("/users/{user_id}", get(handlers::users::get_user))
        .route("/sessions", post(handlers::sessions::create_session))
        .route(
            "/sessions/{session_id}/messages",
            post(handlers::sessions::create_message).get(handlers::sessions::list_messages),
        )
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware_layer::auth::require_auth,
        ))
        .with_state(state.clone());

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default())
                .on_request(DefaultOnRequest::default().level(Level::DEBUG))
                .on_response(DefaultOnResponse::default().level(Level::DEBUG))
                .on_failure(DefaultOnFailure::default().level(Level::ERROR)),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors_layer(&state.config.cors_origins))
}
