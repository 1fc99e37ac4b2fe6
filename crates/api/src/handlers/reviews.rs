//! Handlers for the `/reviews` resource, including the work-scoped routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use shelflife_core::error::CoreError;
use shelflife_core::types::DbId;
use shelflife_db::models::review::{ReviewPayload, ReviewResponse};
use shelflife_db::repositories::ReviewRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::ensure_owned_work;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/reviews
pub async fn list_reviews(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ReviewResponse>>> {
    let reviews = ReviewRepo::list_for_user(&state.pool, auth.user_id).await?;

    Ok(Json(reviews.into_iter().map(ReviewResponse::from).collect()))
}

/// GET /api/reviews/{id}
pub async fn get_review(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(review_id): Path<DbId>,
) -> AppResult<Json<ReviewResponse>> {
    let review = ReviewRepo::find_owned(&state.pool, auth.user_id, review_id)
        .await?
        .ok_or_else(|| review_not_found(review_id))?;

    Ok(Json(review.into()))
}

/// GET /api/works/{id}/review
///
/// The caller's review of an owned work, or a JSON `null` when no review
/// exists yet. "No review" is a normal 200, distinct from the 404 for a
/// foreign or unknown work.
pub async fn get_review_for_work(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(work_id): Path<DbId>,
) -> AppResult<Json<Option<ReviewResponse>>> {
    ensure_owned_work(&state, auth.user_id, work_id).await?;

    let review = ReviewRepo::find_for_work(&state.pool, auth.user_id, work_id).await?;

    Ok(Json(review.map(ReviewResponse::from)))
}

/// PUT /api/works/{id}/review
///
/// Create or replace the one review for this (user, work) pair. The rating
/// is validated before any write.
pub async fn upsert_review_for_work(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(work_id): Path<DbId>,
    Json(input): Json<ReviewPayload>,
) -> AppResult<Json<ReviewResponse>> {
    input.validate()?;

    ensure_owned_work(&state, auth.user_id, work_id).await?;

    let review = ReviewRepo::upsert(&state.pool, auth.user_id, work_id, &input).await?;

    tracing::info!(
        user_id = auth.user_id,
        work_id,
        review_id = review.id,
        "Review upserted"
    );

    Ok(Json(review.into()))
}

/// DELETE /api/reviews/{id}
pub async fn delete_review(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(review_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ReviewRepo::delete_owned(&state.pool, auth.user_id, review_id).await?;

    if !deleted {
        return Err(review_not_found(review_id));
    }

    tracing::info!(user_id = auth.user_id, review_id, "Review deleted");

    Ok(StatusCode::NO_CONTENT)
}

fn review_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Review",
        id,
    })
}
