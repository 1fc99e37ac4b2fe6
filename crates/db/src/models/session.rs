//! Tracking-session entity model and DTOs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use shelflife_core::error::CoreError;
use shelflife_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Upper bound for `minutes` and `units_completed`.
const MAX_UNITS: i32 = 1_000_000;

/// Maximum note length in characters.
const MAX_NOTE_LEN: usize = 500;

/// Full session row from the `sessions` table.
///
/// `started_at` is nullable: it defaults to the creation time on insert,
/// but a full-replace update may clear it.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub user_id: DbId,
    pub work_id: DbId,
    pub started_at: Option<Timestamp>,
    pub ended_at: Option<Timestamp>,
    pub minutes: Option<i32>,
    pub units_completed: Option<i32>,
    pub note: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Session representation for API responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub id: DbId,
    pub work_id: DbId,
    pub started_at: Option<Timestamp>,
    pub ended_at: Option<Timestamp>,
    pub minutes: Option<i32>,
    pub units_completed: Option<i32>,
    pub note: Option<String>,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            id: session.id,
            work_id: session.work_id,
            started_at: session.started_at,
            ended_at: session.ended_at,
            minutes: session.minutes,
            units_completed: session.units_completed,
            note: session.note,
        }
    }
}

/// Create/update request body. Updates are a full replace.
///
/// `work_id` is optional here because the work-scoped route takes it from
/// the path; the flat `/sessions` create requires it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPayload {
    pub work_id: Option<DbId>,
    pub started_at: Option<Timestamp>,
    pub ended_at: Option<Timestamp>,
    pub minutes: Option<i32>,
    pub units_completed: Option<i32>,
    pub note: Option<String>,
}

impl SessionPayload {
    /// Field-level checks mirroring the column constraints.
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut errors = BTreeMap::new();

        if let Some(minutes) = self.minutes {
            if !(1..=MAX_UNITS).contains(&minutes) {
                errors.insert(
                    "minutes".to_string(),
                    format!("Minutes must be between 1 and {MAX_UNITS}"),
                );
            }
        }
        if let Some(units) = self.units_completed {
            if !(0..=MAX_UNITS).contains(&units) {
                errors.insert(
                    "unitsCompleted".to_string(),
                    format!("Units completed must be between 0 and {MAX_UNITS}"),
                );
            }
        }
        if let Some(note) = &self.note {
            if note.len() > MAX_NOTE_LEN {
                errors.insert(
                    "note".to_string(),
                    format!("Note must be at most {MAX_NOTE_LEN} characters"),
                );
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(CoreError::FieldValidation(errors))
        }
    }
}

/// Query parameters for `GET /api/sessions`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionListParams {
    pub work_id: Option<DbId>,
}
