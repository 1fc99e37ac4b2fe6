//! Entity models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - `Serialize` response shapes for the API (camelCase wire names)
//! - A `Deserialize` request payload with hand-rolled field validation

pub mod review;
pub mod session;
pub mod user;
pub mod work;
