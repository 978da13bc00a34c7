use std::sync::Arc;

use uuid::Uuid;

use crate::claimer::{ClaimResult, JobClaimer};
use crate::processor::JobProcessor;

/// What one cycle ended up doing. Cycles run fire-and-forget, so this is
/// logged rather than returned to any HTTP caller.
#[derive(Debug, Clone)]
pub enum CycleOutcome {
    JobFound { id: Uuid, gallery_title: String },
    NoJob,
    Error(String),
}

impl CycleOutcome {
    pub fn summary(&self) -> String {
        match self {
            CycleOutcome::JobFound { gallery_title, .. } => format!("Job found: {gallery_title}"),
            CycleOutcome::NoJob => "No pending jobs available.".to_string(),
            CycleOutcome::Error(message) => message.clone(),
        }
    }
}

/// Runs one end-to-end cycle: claim, hand off, record the outcome. This is
/// the terminal error boundary for a scheduled cycle; nothing propagates out
/// because the spawned task has no caller left to receive it.
pub struct CycleRunner {
    claimer: JobClaimer,
    processor: Arc<dyn JobProcessor>,
}

impl CycleRunner {
    pub fn new(claimer: JobClaimer, processor: Arc<dyn JobProcessor>) -> Self {
        Self { claimer, processor }
    }

    /// One claim attempt, no retry, no scheduling loop.
    pub async fn run_cycle(&self) -> CycleOutcome {
        tracing::info!("Starting publication cycle");

        let outcome = match self.claimer.run().await {
            ClaimResult::Claimed(job) => {
                let outcome = CycleOutcome::JobFound {
                    id: job.id,
                    gallery_title: job.gallery_title.clone(),
                };
                // The item stays in processing either way; its terminal
                // transition belongs to the collaborator.
                if let Err(e) = self.processor.process(&job).await {
                    tracing::error!(job_id = %job.id, "Processor failed: {e}");
                }
                outcome
            }
            ClaimResult::NoJob => CycleOutcome::NoJob,
            ClaimResult::Failed { message } => CycleOutcome::Error(message),
        };

        match &outcome {
            CycleOutcome::Error(message) => tracing::error!("Cycle failed: {message}"),
            _ => tracing::info!("Cycle completed: {}", outcome.summary()),
        }

        outcome
    }
}
