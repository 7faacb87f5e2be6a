//! # vmum_api
//!
//! HTTP API library for Virtual Mum.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;
use vmum_core::relay::ChatRelay;

use crate::config::ApiConfig;
use crate::handlers::{app_page, chat, health, index};
use crate::services::origins::OriginPolicy;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: ApiConfig,
    /// Chat relay with its injected completion client.
    pub relay: ChatRelay,
    /// Origin allow-list derived from `config.allowed_origins`.
    pub origins: OriginPolicy,
}

impl AppState {
    pub fn new(config: ApiConfig, relay: ChatRelay) -> Self {
        let origins = OriginPolicy::new(config.allowed_origins.as_slice());
        Self {
            config,
            relay,
            origins,
        }
    }
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = middleware::origin::cors_layer(&state.origins);

    Router::new()
        .route(routes::GET_INDEX, get(index::index_handler))
        .route(routes::GET_APP, get(app_page::app_page_handler))
        .route(routes::GET_HEALTH, get(health::health_handler))
        .route(routes::POST_CHAT, post(chat::chat_handler))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::origin::enforce_origin,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
