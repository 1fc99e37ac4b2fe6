pub mod auth;
pub mod health;
pub mod reviews;
pub mod sessions;
pub mod users;
pub mod works;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                   register (public)
/// /auth/login                      login (public)
///
/// /users/me                        current profile
///
/// /works                           list, create
/// /works/{id}                      get, update, delete
/// /works/{id}/sessions             list, create (work-scoped)
/// /works/{id}/review               get-or-null, upsert
///
/// /sessions                        list (optional ?workId=), create
/// /sessions/{id}                   get, update, delete
///
/// /reviews                         list
/// /reviews/{id}                    get, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/works", works::router())
        .nest("/sessions", sessions::router())
        .nest("/reviews", reviews::router())
}
