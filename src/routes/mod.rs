pub mod cycle;
pub mod status;

use axum::Router;
use axum::routing::{get, post};

use crate::state::SharedState;

pub fn app_routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(status::root))
        .route("/health", get(status::health))
        .route("/trigger-cycle", post(cycle::trigger))
}
