use sqlx::PgPool;
use uuid::Uuid;

use crate::models::published_item::{JobStatus, PublishedItem};

/// Atomically claim the oldest pending item using SELECT FOR UPDATE SKIP LOCKED.
///
/// The row lock and the status write commit together or not at all. Rows held
/// by another in-flight transaction are skipped rather than waited on. The
/// returned row is the pre-update snapshot, so the caller sees the item as it
/// was while still pending.
pub async fn claim_next(pool: &PgPool) -> Result<Option<PublishedItem>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let row = sqlx::query_as::<_, PublishedItem>(
        r#"SELECT id, "galleryTitle", "creatorName", images, status, "createdAt", "processingStartedAt"
           FROM "PublishedItem"
           WHERE status = $1
           ORDER BY "createdAt"
           LIMIT 1
           FOR UPDATE SKIP LOCKED"#,
    )
    .bind(JobStatus::Pending.as_str())
    .fetch_optional(&mut *tx)
    .await?;

    let row = match row {
        Some(row) => row,
        None => {
            tx.rollback().await?;
            return Ok(None);
        }
    };

    sqlx::query(
        r#"UPDATE "PublishedItem"
           SET status = $2, "processingStartedAt" = NOW()
           WHERE id = $1"#,
    )
    .bind(row.id)
    .bind(JobStatus::Processing.as_str())
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(Some(row))
}

/// Record a finished job. Only a processing item may reach a terminal state;
/// anything else is left untouched and reported as false.
pub async fn mark_done(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"UPDATE "PublishedItem" SET status = $2
           WHERE id = $1 AND status = $3"#,
    )
    .bind(id)
    .bind(JobStatus::Done.as_str())
    .bind(JobStatus::Processing.as_str())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Record a failed job, with the same processing-only guard as [`mark_done`].
pub async fn mark_failed(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"UPDATE "PublishedItem" SET status = $2
           WHERE id = $1 AND status = $3"#,
    )
    .bind(id)
    .bind(JobStatus::Failed.as_str())
    .bind(JobStatus::Processing.as_str())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<PublishedItem>, sqlx::Error> {
    sqlx::query_as::<_, PublishedItem>(
        r#"SELECT id, "galleryTitle", "creatorName", images, status, "createdAt", "processingStartedAt"
           FROM "PublishedItem"
           WHERE id = $1"#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}
