//! Domain error taxonomy.
//!
//! Services raise these; the API layer translates them to HTTP exactly once.
//! Cross-user access deliberately surfaces as [`CoreError::NotFound`] so a
//! caller cannot distinguish "someone else's row" from "no such row".

use std::collections::BTreeMap;

use crate::types::DbId;

/// A domain-level failure.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The entity does not exist, or is not owned by the caller.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// A business-rule violation with a single message.
    #[error("{0}")]
    Validation(String),

    /// Malformed input with per-field messages.
    #[error("Validation failed")]
    FieldValidation(BTreeMap<String, String>),

    /// A uniqueness conflict (duplicate username/email, duplicate review).
    #[error("{0}")]
    Conflict(String),

    /// Missing or unverifiable caller identity.
    #[error("{0}")]
    Unauthorized(String),

    /// Anything unexpected. The message is logged, never sent to clients.
    #[error("Internal error: {0}")]
    Internal(String),
}
