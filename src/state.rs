use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::processor::JobProcessor;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
    pub processor: Arc<dyn JobProcessor>,
}
