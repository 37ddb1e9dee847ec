//! # Crypto Vote Backend
//!
//! HTTP service for CRUD and voting over cryptocurrencies.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (validation, vote logic)
//!     ↓
//! Storage Layer (MySQL / SQLite via sqlx)
//! ```
//!
//! This module is the single composition root: it connects storage, builds the
//! service and wires the router.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing::info;

use crate::config::Config;
use crate::domain::CryptoCurrencyService;
use crate::storage::CryptoCurrencyStorage;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub crypto_currency_service: CryptoCurrencyService,
}

impl AppState {
    pub fn new(crypto_currency_service: CryptoCurrencyService) -> Self {
        Self {
            crypto_currency_service,
        }
    }

    /// Build the state around an already connected repository
    pub fn with_storage(repository: Arc<dyn CryptoCurrencyStorage>) -> Self {
        Self::new(CryptoCurrencyService::new(repository))
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &Config) -> Result<AppState> {
    info!("Setting up database");
    let repository = storage::connect(&config.database).await?;

    info!("Setting up application state");
    Ok(AppState::with_storage(repository))
}

/// Create the Axum router with all routes configured.
///
/// Routes are served both at the root and under the `/v1` prefix.
pub fn create_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

    Router::new()
        .nest("/cryptovote", io::crypto_currency_apis::router())
        .nest("/v1/cryptovote", io::crypto_currency_apis::router())
        .fallback(io::route_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(SetResponseHeaderLayer::if_not_present(
                    CONTENT_TYPE,
                    HeaderValue::from_static("application/json"),
                )),
        )
        .with_state(app_state)
}
