//! Handlers for the `/users` resource.

use axum::extract::State;
use axum::Json;
use shelflife_core::error::CoreError;
use shelflife_db::models::user::UserProfile;
use shelflife_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/users/me
///
/// The authenticated caller's profile. A valid token whose user row has
/// since been deleted yields 404.
pub async fn me(auth: AuthUser, State(state): State<AppState>) -> AppResult<Json<UserProfile>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    Ok(Json(user.into()))
}
