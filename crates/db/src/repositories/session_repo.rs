//! Repository for the `sessions` table.

use shelflife_core::types::DbId;
use sqlx::PgPool;

use crate::models::session::{Session, SessionPayload};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, work_id, started_at, ended_at, minutes, units_completed, \
                       note, created_at, updated_at";

/// Provides ownership-scoped CRUD operations for tracking sessions.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new session against a work, returning the created row.
    /// `started_at` defaults to the insertion time when the payload omits it.
    /// Callers must have verified that `work_id` is owned by `user_id`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        work_id: DbId,
        input: &SessionPayload,
    ) -> Result<Session, sqlx::Error> {
        let query = format!(
            "INSERT INTO sessions (user_id, work_id, started_at, ended_at, minutes,
                                   units_completed, note, created_at, updated_at)
             VALUES ($1, $2, COALESCE($3, NOW()), $4, $5, $6, $7, NOW(), NOW())
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(user_id)
            .bind(work_id)
            .bind(input.started_at)
            .bind(input.ended_at)
            .bind(input.minutes)
            .bind(input.units_completed)
            .bind(&input.note)
            .fetch_one(pool)
            .await
    }

    /// List all of a user's sessions, most recently started first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Session>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sessions
             WHERE user_id = $1
             ORDER BY started_at DESC NULLS LAST"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// List a user's sessions for one work, most recently started first.
    /// Callers must have verified that `work_id` is owned by `user_id`.
    pub async fn list_for_work(
        pool: &PgPool,
        user_id: DbId,
        work_id: DbId,
    ) -> Result<Vec<Session>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sessions
             WHERE user_id = $1 AND work_id = $2
             ORDER BY started_at DESC NULLS LAST"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(user_id)
            .bind(work_id)
            .fetch_all(pool)
            .await
    }

    /// Find a session by ID, scoped to its owner.
    pub async fn find_owned(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Session>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sessions WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Session>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Full replace of all mutable fields, including a possible reassignment
    /// to another work (callers verify the new work's ownership first).
    /// Returns `None` if the session does not exist or is not owned.
    pub async fn update_owned(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        work_id: DbId,
        input: &SessionPayload,
    ) -> Result<Option<Session>, sqlx::Error> {
        let query = format!(
            "UPDATE sessions SET
                work_id = $3,
                started_at = $4,
                ended_at = $5,
                minutes = $6,
                units_completed = $7,
                note = $8,
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(id)
            .bind(user_id)
            .bind(work_id)
            .bind(input.started_at)
            .bind(input.ended_at)
            .bind(input.minutes)
            .bind(input.units_completed)
            .bind(&input.note)
            .fetch_optional(pool)
            .await
    }

    /// Delete a session, scoped to its owner. Returns `true` if a row was
    /// deleted.
    pub async fn delete_owned(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
