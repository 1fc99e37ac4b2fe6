//! Route definitions for the `/works` resource.
//!
//! Also mounts the work-scoped session and review routes under
//! `/works/{id}/...`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{reviews, sessions, works};
use crate::state::AppState;

/// Routes mounted at `/works`.
///
/// ```text
/// GET    /               -> list_works
/// POST   /               -> create_work
/// GET    /{id}           -> get_work
/// PUT    /{id}           -> update_work
/// DELETE /{id}           -> delete_work
///
/// GET    /{id}/sessions  -> list_sessions_for_work
/// POST   /{id}/sessions  -> create_session_for_work
///
/// GET    /{id}/review    -> get_review_for_work (null when absent)
/// PUT    /{id}/review    -> upsert_review_for_work
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(works::list_works).post(works::create_work))
        .route(
            "/{id}",
            get(works::get_work)
                .put(works::update_work)
                .delete(works::delete_work),
        )
        .route(
            "/{id}/sessions",
            get(sessions::list_sessions_for_work).post(sessions::create_session_for_work),
        )
        .route(
            "/{id}/review",
            get(reviews::get_review_for_work).put(reviews::upsert_review_for_work),
        )
}
