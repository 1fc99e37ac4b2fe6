//! Repository for the `reviews` table.

use shelflife_core::types::DbId;
use sqlx::PgPool;

use crate::models::review::{Review, ReviewPayload};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, work_id, rating, title, body, is_private, \
                       created_at, updated_at";

/// Provides ownership-scoped operations for reviews.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Insert or update the one review for `(user_id, work_id)`.
    ///
    /// Rides on the `uq_reviews_user_work` unique index: a second upsert for
    /// the same pair updates the existing row in place, preserving `id` and
    /// `created_at` and refreshing `updated_at`. Callers validate the rating
    /// and the work's ownership before calling.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        work_id: DbId,
        input: &ReviewPayload,
    ) -> Result<Review, sqlx::Error> {
        let query = format!(
            "INSERT INTO reviews (user_id, work_id, rating, title, body, is_private,
                                  created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, NOW(), NOW())
             ON CONFLICT (user_id, work_id) DO UPDATE SET
                rating = EXCLUDED.rating,
                title = EXCLUDED.title,
                body = EXCLUDED.body,
                is_private = EXCLUDED.is_private,
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(user_id)
            .bind(work_id)
            .bind(input.rating)
            .bind(&input.title)
            .bind(&input.body)
            .bind(input.is_private)
            .fetch_one(pool)
            .await
    }

    /// List all of a user's reviews, most recently created first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Review>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reviews WHERE user_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Find a review by ID, scoped to its owner.
    pub async fn find_owned(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Review>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reviews WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// The user's review of one work, if any. "No review yet" is an
    /// ordinary `None`, not an error.
    pub async fn find_for_work(
        pool: &PgPool,
        user_id: DbId,
        work_id: DbId,
    ) -> Result<Option<Review>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reviews WHERE user_id = $1 AND work_id = $2");
        sqlx::query_as::<_, Review>(&query)
            .bind(user_id)
            .bind(work_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a review, scoped to its owner. Returns `true` if a row was
    /// deleted.
    pub async fn delete_owned(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
