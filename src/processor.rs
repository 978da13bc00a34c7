use async_trait::async_trait;

use crate::models::published_item::ClaimedJob;

#[derive(Debug)]
pub struct ProcessError {
    pub message: String,
}

impl std::fmt::Display for ProcessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<String> for ProcessError {
    fn from(s: String) -> Self {
        ProcessError { message: s }
    }
}

impl From<&str> for ProcessError {
    fn from(s: &str) -> Self {
        ProcessError {
            message: s.to_string(),
        }
    }
}

/// The downstream collaborator that prepares and publishes a claimed gallery.
/// Implementations own the item's terminal transition (done or failed) once
/// their work completes; the dispatch core leaves claimed items in processing.
#[async_trait]
pub trait JobProcessor: Send + Sync {
    async fn process(&self, job: &ClaimedJob) -> Result<(), ProcessError>;
}

/// Records the handoff and nothing else. Stands in for the publication
/// pipeline in deployments where preparation and delivery run elsewhere.
pub struct LogProcessor;

impl LogProcessor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl JobProcessor for LogProcessor {
    async fn process(&self, job: &ClaimedJob) -> Result<(), ProcessError> {
        tracing::info!(
            job_id = %job.id,
            creator = %job.creator_name,
            image_count = job.images.len(),
            "Handing off gallery \"{}\" for publication",
            job.gallery_title
        );
        Ok(())
    }
}
