use sqlx::PgPool;

use crate::db;
use crate::models::published_item::ClaimedJob;

/// Outcome of a single claim attempt.
#[derive(Debug, Clone)]
pub enum ClaimResult {
    /// A pending item was locked, marked processing, and decoded.
    Claimed(ClaimedJob),
    /// The queue held no claimable item. Not an error.
    NoJob,
    /// The claim transaction or payload decoding failed. An aborted
    /// transaction leaves the queue untouched.
    Failed { message: String },
}

/// Thin façade over the queue store's claim primitive. Stateless apart from
/// the pool handle, so any number of cycles may run it concurrently.
#[derive(Clone)]
pub struct JobClaimer {
    pool: PgPool,
}

impl JobClaimer {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn run(&self) -> ClaimResult {
        let row = match db::published_items::claim_next(&self.pool).await {
            Ok(Some(row)) => row,
            Ok(None) => return ClaimResult::NoJob,
            Err(e) => {
                return ClaimResult::Failed {
                    message: format!("Failed to claim queue item: {e}"),
                };
            }
        };

        tracing::debug!(item_id = %row.id, "Claimed queue item");

        match ClaimedJob::from_row(row) {
            Ok(job) => ClaimResult::Claimed(job),
            Err(e) => ClaimResult::Failed {
                message: format!("Failed to decode images payload: {e}"),
            },
        }
    }
}
