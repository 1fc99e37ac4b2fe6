//! Handlers for the `/sessions` resource, including the work-scoped routes.

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use shelflife_core::error::CoreError;
use shelflife_core::types::DbId;
use shelflife_db::models::session::{SessionListParams, SessionPayload, SessionResponse};
use shelflife_db::repositories::SessionRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::ensure_owned_work;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/sessions[?workId=]
///
/// All of the caller's sessions, most recently started first, optionally
/// filtered to one owned work.
pub async fn list_sessions(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<SessionListParams>,
) -> AppResult<Json<Vec<SessionResponse>>> {
    let sessions = match params.work_id {
        Some(work_id) => {
            ensure_owned_work(&state, auth.user_id, work_id).await?;
            SessionRepo::list_for_work(&state.pool, auth.user_id, work_id).await?
        }
        None => SessionRepo::list_for_user(&state.pool, auth.user_id).await?,
    };

    Ok(Json(sessions.into_iter().map(SessionResponse::from).collect()))
}

/// GET /api/works/{id}/sessions
pub async fn list_sessions_for_work(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(work_id): Path<DbId>,
) -> AppResult<Json<Vec<SessionResponse>>> {
    ensure_owned_work(&state, auth.user_id, work_id).await?;

    let sessions = SessionRepo::list_for_work(&state.pool, auth.user_id, work_id).await?;

    Ok(Json(sessions.into_iter().map(SessionResponse::from).collect()))
}

/// GET /api/sessions/{id}
pub async fn get_session(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(session_id): Path<DbId>,
) -> AppResult<Json<SessionResponse>> {
    let session = SessionRepo::find_owned(&state.pool, auth.user_id, session_id)
        .await?
        .ok_or_else(|| session_not_found(session_id))?;

    Ok(Json(session.into()))
}

/// POST /api/sessions
///
/// `workId` is required in the body here; the work-scoped route takes it
/// from the path instead.
pub async fn create_session(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SessionPayload>,
) -> AppResult<(StatusCode, Json<SessionResponse>)> {
    input.validate()?;

    let work_id = input.work_id.ok_or_else(|| {
        let mut fields = BTreeMap::new();
        fields.insert("workId".to_string(), "Work id is required".to_string());
        AppError::Core(CoreError::FieldValidation(fields))
    })?;

    insert_session(&state, auth.user_id, work_id, &input).await
}

/// POST /api/works/{id}/sessions
///
/// The path work id is authoritative; any `workId` in the body is ignored.
pub async fn create_session_for_work(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(work_id): Path<DbId>,
    Json(input): Json<SessionPayload>,
) -> AppResult<(StatusCode, Json<SessionResponse>)> {
    input.validate()?;

    insert_session(&state, auth.user_id, work_id, &input).await
}

/// PUT /api/sessions/{id}
///
/// Full replace. The session may be reassigned to another work as long as
/// the caller owns that work too.
pub async fn update_session(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(session_id): Path<DbId>,
    Json(input): Json<SessionPayload>,
) -> AppResult<Json<SessionResponse>> {
    input.validate()?;

    let session = SessionRepo::find_owned(&state.pool, auth.user_id, session_id)
        .await?
        .ok_or_else(|| session_not_found(session_id))?;

    let work_id = match input.work_id {
        Some(new_work_id) if new_work_id != session.work_id => {
            ensure_owned_work(&state, auth.user_id, new_work_id).await?;
            new_work_id
        }
        _ => session.work_id,
    };

    let updated = SessionRepo::update_owned(&state.pool, auth.user_id, session_id, work_id, &input)
        .await?
        .ok_or_else(|| session_not_found(session_id))?;

    tracing::info!(user_id = auth.user_id, session_id, "Session updated");

    Ok(Json(updated.into()))
}

/// DELETE /api/sessions/{id}
pub async fn delete_session(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(session_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = SessionRepo::delete_owned(&state.pool, auth.user_id, session_id).await?;

    if !deleted {
        return Err(session_not_found(session_id));
    }

    tracing::info!(user_id = auth.user_id, session_id, "Session deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Shared create path: verify work ownership, then insert.
async fn insert_session(
    state: &AppState,
    user_id: DbId,
    work_id: DbId,
    input: &SessionPayload,
) -> AppResult<(StatusCode, Json<SessionResponse>)> {
    ensure_owned_work(state, user_id, work_id).await?;

    let session = SessionRepo::create(&state.pool, user_id, work_id, input).await?;

    tracing::info!(user_id, work_id, session_id = session.id, "Session created");

    Ok((StatusCode::CREATED, Json(session.into())))
}

fn session_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Session",
        id,
    })
}
