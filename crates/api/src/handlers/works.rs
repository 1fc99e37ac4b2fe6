//! Handlers for the `/works` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use shelflife_core::error::CoreError;
use shelflife_core::types::DbId;
use shelflife_db::models::work::{WorkDetail, WorkPayload, WorkSummary};
use shelflife_db::repositories::{UserRepo, WorkRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/works
///
/// The caller's library in shelf order: TO_EXPLORE, then IN_PROGRESS, then
/// FINISHED, each shelf sorted by title case-insensitively.
pub async fn list_works(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<WorkSummary>>> {
    let works = WorkRepo::list_for_user(&state.pool, auth.user_id).await?;

    Ok(Json(works.into_iter().map(WorkSummary::from).collect()))
}

/// GET /api/works/{id}
pub async fn get_work(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(work_id): Path<DbId>,
) -> AppResult<Json<WorkDetail>> {
    let work = WorkRepo::find_owned(&state.pool, auth.user_id, work_id)
        .await?
        .ok_or_else(|| work_not_found(work_id))?;

    Ok(Json(work.into()))
}

/// POST /api/works
pub async fn create_work(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<WorkPayload>,
) -> AppResult<(StatusCode, Json<WorkDetail>)> {
    input.validate()?;

    // The token may outlive the account.
    UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    let work = WorkRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(user_id = auth.user_id, work_id = work.id, "Work created");

    Ok((StatusCode::CREATED, Json(work.into())))
}

/// PUT /api/works/{id}
///
/// Full replace of all mutable fields.
pub async fn update_work(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(work_id): Path<DbId>,
    Json(input): Json<WorkPayload>,
) -> AppResult<Json<WorkDetail>> {
    input.validate()?;

    let work = WorkRepo::update_owned(&state.pool, auth.user_id, work_id, &input)
        .await?
        .ok_or_else(|| work_not_found(work_id))?;

    tracing::info!(user_id = auth.user_id, work_id, "Work updated");

    Ok(Json(work.into()))
}

/// DELETE /api/works/{id}
///
/// Deletes the work and, via the FK cascade, its sessions and reviews.
pub async fn delete_work(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(work_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = WorkRepo::delete_owned(&state.pool, auth.user_id, work_id).await?;

    if !deleted {
        return Err(work_not_found(work_id));
    }

    tracing::info!(user_id = auth.user_id, work_id, "Work deleted");

    Ok(StatusCode::NO_CONTENT)
}

fn work_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Work", id })
}
