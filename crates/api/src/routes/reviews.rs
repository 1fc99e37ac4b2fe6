//! Route definitions for the `/reviews` resource.
//!
//! The upsert lives under `/works/{id}/review`; this router only serves
//! id-based reads and deletes plus the full listing.

use axum::routing::get;
use axum::Router;

use crate::handlers::reviews;
use crate::state::AppState;

/// Routes mounted at `/reviews`.
///
/// ```text
/// GET    /       -> list_reviews
/// GET    /{id}   -> get_review
/// DELETE /{id}   -> delete_review
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(reviews::list_reviews))
        .route(
            "/{id}",
            get(reviews::get_review).delete(reviews::delete_review),
        )
}
