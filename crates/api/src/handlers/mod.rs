//! HTTP handlers, one module per resource.
//!
//! All endpoints except registration, login, and the health probe require
//! authentication via [`AuthUser`](crate::middleware::auth::AuthUser).

pub mod auth;
pub mod reviews;
pub mod sessions;
pub mod users;
pub mod works;

use shelflife_core::error::CoreError;
use shelflife_core::types::DbId;
use shelflife_db::repositories::WorkRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Verify that `work_id` exists and belongs to `user_id`.
///
/// Foreign and nonexistent works fail identically, so existence is never
/// leaked across users.
pub(crate) async fn ensure_owned_work(
    state: &AppState,
    user_id: DbId,
    work_id: DbId,
) -> AppResult<()> {
    WorkRepo::find_owned(&state.pool, user_id, work_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Work",
            id: work_id,
        }))?;
    Ok(())
}
