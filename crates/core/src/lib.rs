//! Shared domain primitives for the shelflife backend.
//!
//! Holds the types every other crate agrees on: ID and timestamp aliases,
//! and the domain error taxonomy that the API layer translates to HTTP.

pub mod error;
pub mod types;
