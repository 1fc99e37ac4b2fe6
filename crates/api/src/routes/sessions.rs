//! Route definitions for the `/sessions` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::sessions;
use crate::state::AppState;

/// Routes mounted at `/sessions`.
///
/// ```text
/// GET    /       -> list_sessions (optional ?workId= filter)
/// POST   /       -> create_session
/// GET    /{id}   -> get_session
/// PUT    /{id}   -> update_session
/// DELETE /{id}   -> delete_session
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(sessions::list_sessions).post(sessions::create_session),
        )
        .route(
            "/{id}",
            get(sessions::get_session)
                .put(sessions::update_session)
                .delete(sessions::delete_session),
        )
}
