//! Beer Stock API Library
//!
//! Registers beers and keeps each beer's stock within its capacity. The HTTP
//! surface lives under `/api/v1/beers`; storage is SeaORM or an in-process map.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod middleware_helpers;
pub mod migrator;
pub mod models;
pub mod openapi;
pub mod repositories;
pub mod services;
pub mod tracing;

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::errors::ServiceError;
use crate::repositories::{BeerRepository, InMemoryBeerRepository, SeaOrmBeerRepository};
use crate::services::BeerStockService;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub config: config::AppConfig,
    pub beer_service: BeerStockService,
}

impl AppState {
    pub fn new(config: config::AppConfig, repository: Arc<dyn BeerRepository>) -> Self {
        Self {
            config,
            beer_service: BeerStockService::new(repository),
        }
    }

    /// Builds state for the configured store backend, connecting and
    /// migrating the database when the SQL backend is selected.
    pub async fn from_config(config: config::AppConfig) -> Result<Self, ServiceError> {
        let repository: Arc<dyn BeerRepository> = if config.uses_in_memory_store() {
            ::tracing::info!("Using in-memory beer store");
            Arc::new(InMemoryBeerRepository::new())
        } else {
            let pool = db::establish_connection_from_app_config(&config).await?;
            if config.auto_migrate {
                db::run_migrations(&pool).await.map_err(|e| {
                    ::tracing::error!("Failed running migrations: {}", e);
                    e
                })?;
            }
            Arc::new(SeaOrmBeerRepository::new(Arc::new(pool)))
        };

        Ok(Self::new(config, repository))
    }
}

/// Routes mounted under `/api/v1`
pub fn api_v1_routes() -> Router<AppState> {
    Router::new().nest("/beers", handlers::beers::beer_routes())
}

/// Full application router: API, health, docs, request ids and HTTP tracing.
///
/// CORS and compression are left to the binary.
pub fn app_router(state: AppState) -> Router {
    Router::<AppState>::new()
        .route("/", get(|| async { "beer-stock-api up" }))
        .route("/health", get(handlers::health::health_check))
        .nest("/api/v1", api_v1_routes())
        .merge(openapi::swagger_ui())
        // HTTP tracing layer for consistent request/response telemetry
        .layer(crate::tracing::configure_http_tracing())
        // Ensure every request carries a request id for traceability
        .layer(axum::middleware::from_fn(
            middleware_helpers::request_id::request_id_middleware,
        ))
        .with_state(state)
}
