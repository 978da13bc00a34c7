use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// One row of the producer-owned "PublishedItem" queue table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PublishedItem {
    pub id: Uuid,
    #[sqlx(rename = "galleryTitle")]
    pub gallery_title: String,
    #[sqlx(rename = "creatorName")]
    pub creator_name: String,
    pub images: Value,
    pub status: String,
    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[sqlx(rename = "processingStartedAt")]
    pub processing_started_at: Option<DateTime<Utc>>,
}

/// Lifecycle of a queue item, stored as plain text in the status column.
/// pending -> processing -> done | failed, nothing ever leaves a terminal
/// state and nothing skips processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Processing,
    Done,
    Failed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Processing => "processing",
            JobStatus::Done => "done",
            JobStatus::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Option<JobStatus> {
        match s {
            "pending" => Some(JobStatus::Pending),
            "processing" => Some(JobStatus::Processing),
            "done" => Some(JobStatus::Done),
            "failed" => Some(JobStatus::Failed),
            _ => None,
        }
    }
}

/// A claimed job as handed to the processing collaborator, with the images
/// payload normalized into a native list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimedJob {
    pub id: Uuid,
    pub gallery_title: String,
    pub creator_name: String,
    pub images: Vec<String>,
}

impl ClaimedJob {
    pub fn from_row(row: PublishedItem) -> Result<Self, serde_json::Error> {
        Ok(ClaimedJob {
            id: row.id,
            gallery_title: row.gallery_title,
            creator_name: row.creator_name,
            images: decode_images(row.images)?,
        })
    }
}

/// Decode the images column into an ordered list of media references.
/// Producers store either a native JSON array or a JSON string containing a
/// serialized array; both forms decode to the same list.
pub fn decode_images(value: Value) -> Result<Vec<String>, serde_json::Error> {
    match value {
        Value::String(raw) => serde_json::from_str(&raw),
        other => serde_json::from_value(other),
    }
}
