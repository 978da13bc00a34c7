pub mod claimer;
pub mod config;
pub mod cycle;
pub mod db;
pub mod models;
pub mod processor;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderName, HeaderValue};
use sqlx::PgPool;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::processor::{JobProcessor, LogProcessor};
use crate::state::{AppState, SharedState};

pub fn build_app(pool: PgPool, config: Config) -> Router {
    // Content preparation and delivery run elsewhere; the shipped processor
    // only records the handoff.
    let processor: Arc<dyn JobProcessor> = Arc::new(LogProcessor::new());

    let state: SharedState = Arc::new(AppState {
        pool,
        config,
        processor,
    });

    Router::new()
        .merge(routes::app_routes())
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
