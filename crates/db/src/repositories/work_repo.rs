//! Repository for the `works` table.

use shelflife_core::types::DbId;
use sqlx::PgPool;

use crate::models::work::{Work, WorkPayload};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, title, work_type, creator, genre, status, total_units, \
                       cover_url, started_at, finished_at, created_at, updated_at";

/// Provides ownership-scoped CRUD operations for works.
pub struct WorkRepo;

impl WorkRepo {
    /// Insert a new work for the given user, returning the created row.
    /// Absent `type`/`status` fall back to BOOK / TO_EXPLORE.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &WorkPayload,
    ) -> Result<Work, sqlx::Error> {
        let query = format!(
            "INSERT INTO works (user_id, title, work_type, creator, genre, status,
                                total_units, cover_url, started_at, finished_at,
                                created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, NOW(), NOW())
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Work>(&query)
            .bind(user_id)
            .bind(&input.title)
            .bind(input.work_type.unwrap_or_default())
            .bind(&input.creator)
            .bind(&input.genre)
            .bind(input.status.unwrap_or_default())
            .bind(input.total_units)
            .bind(&input.cover_url)
            .bind(input.started_at)
            .bind(input.finished_at)
            .fetch_one(pool)
            .await
    }

    /// List a user's works in shelf order: status first (the `work_status`
    /// enum declares TO_EXPLORE < IN_PROGRESS < FINISHED), then title,
    /// case-insensitively.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Work>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM works
             WHERE user_id = $1
             ORDER BY status ASC, LOWER(title) ASC"
        );
        sqlx::query_as::<_, Work>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Find a work by ID, scoped to its owner. Another user's work is
    /// indistinguishable from a missing one.
    pub async fn find_owned(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Work>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM works WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Work>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Full replace of all mutable fields. Returns `None` if the work does
    /// not exist or is not owned by `user_id`. `user_id` itself is immutable.
    pub async fn update_owned(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &WorkPayload,
    ) -> Result<Option<Work>, sqlx::Error> {
        let query = format!(
            "UPDATE works SET
                title = $3,
                work_type = $4,
                creator = $5,
                genre = $6,
                status = $7,
                total_units = $8,
                cover_url = $9,
                started_at = $10,
                finished_at = $11,
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Work>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.title)
            .bind(input.work_type.unwrap_or_default())
            .bind(&input.creator)
            .bind(&input.genre)
            .bind(input.status.unwrap_or_default())
            .bind(input.total_units)
            .bind(&input.cover_url)
            .bind(input.started_at)
            .bind(input.finished_at)
            .fetch_optional(pool)
            .await
    }

    /// Delete a work, scoped to its owner. The FK cascade removes the work's
    /// sessions and reviews. Returns `true` if a row was deleted.
    pub async fn delete_owned(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM works WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
