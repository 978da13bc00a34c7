use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::claimer::JobClaimer;
use crate::cycle::CycleRunner;
use crate::state::SharedState;

/// Schedule one publication cycle in the background and acknowledge
/// immediately. The caller learns only that triggering succeeded; the cycle's
/// own outcome lands in the logs. Overlapping triggers are safe because
/// claims are arbitrated by the queue store's row locks.
pub async fn trigger(State(state): State<SharedState>) -> Json<Value> {
    tracing::info!("Cycle triggered via API");

    let runner = CycleRunner::new(JobClaimer::new(state.pool.clone()), state.processor.clone());
    tokio::spawn(async move {
        runner.run_cycle().await;
    });

    Json(json!({
        "status": "success",
        "detail": "Publication cycle triggered in the background.",
    }))
}
