//! Work entity model, shelf enums, and DTOs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use shelflife_core::error::CoreError;
use shelflife_core::types::{CalendarDate, DbId, Timestamp};
use sqlx::FromRow;

/// Kind of work on the shelf (maps to the `work_type` Postgres enum).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "work_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkType {
    #[default]
    Book,
    Movie,
    Show,
    Game,
    Other,
}

/// Shelf status (maps to the `work_status` Postgres enum).
///
/// Declaration order doubles as the listing order: to-explore first,
/// finished last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "work_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkStatus {
    #[default]
    ToExplore,
    InProgress,
    Finished,
}

/// Full work row from the `works` table.
#[derive(Debug, Clone, FromRow)]
pub struct Work {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub work_type: WorkType,
    pub creator: Option<String>,
    pub genre: Option<String>,
    pub status: WorkStatus,
    pub total_units: Option<i32>,
    pub cover_url: Option<String>,
    pub started_at: Option<CalendarDate>,
    pub finished_at: Option<CalendarDate>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Compact work representation for the library listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkSummary {
    pub id: DbId,
    pub title: String,
    pub creator: Option<String>,
    #[serde(rename = "type")]
    pub work_type: WorkType,
    pub genre: Option<String>,
    pub status: WorkStatus,
}

impl From<Work> for WorkSummary {
    fn from(work: Work) -> Self {
        Self {
            id: work.id,
            title: work.title,
            creator: work.creator,
            work_type: work.work_type,
            genre: work.genre,
            status: work.status,
        }
    }
}

/// Full work representation for single-work responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkDetail {
    pub id: DbId,
    pub title: String,
    #[serde(rename = "type")]
    pub work_type: WorkType,
    pub creator: Option<String>,
    pub genre: Option<String>,
    pub status: WorkStatus,
    pub total_units: Option<i32>,
    pub cover_url: Option<String>,
    pub started_at: Option<CalendarDate>,
    pub finished_at: Option<CalendarDate>,
}

impl From<Work> for WorkDetail {
    fn from(work: Work) -> Self {
        Self {
            id: work.id,
            title: work.title,
            work_type: work.work_type,
            creator: work.creator,
            genre: work.genre,
            status: work.status,
            total_units: work.total_units,
            cover_url: work.cover_url,
            started_at: work.started_at,
            finished_at: work.finished_at,
        }
    }
}

/// Create/update request body. Updates are a full replace of all mutable
/// fields, so one payload serves both; absent `type`/`status` fall back to
/// their defaults on either path.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkPayload {
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type")]
    pub work_type: Option<WorkType>,
    pub creator: Option<String>,
    pub genre: Option<String>,
    pub status: Option<WorkStatus>,
    pub total_units: Option<i32>,
    pub cover_url: Option<String>,
    pub started_at: Option<CalendarDate>,
    pub finished_at: Option<CalendarDate>,
}

impl WorkPayload {
    /// Field-level checks mirroring the column constraints. Keys use the
    /// wire (camelCase) field names.
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut errors = BTreeMap::new();

        if self.title.trim().is_empty() {
            errors.insert("title".to_string(), "Title is required".to_string());
        } else if self.title.len() > 255 {
            errors.insert(
                "title".to_string(),
                "Title must be at most 255 characters".to_string(),
            );
        }
        if let Some(creator) = &self.creator {
            if creator.len() > 255 {
                errors.insert(
                    "creator".to_string(),
                    "Creator must be at most 255 characters".to_string(),
                );
            }
        }
        if let Some(genre) = &self.genre {
            if genre.len() > 100 {
                errors.insert(
                    "genre".to_string(),
                    "Genre must be at most 100 characters".to_string(),
                );
            }
        }
        if let Some(units) = self.total_units {
            if units < 1 {
                errors.insert(
                    "totalUnits".to_string(),
                    "Total units must be a positive number".to_string(),
                );
            }
        }
        if let Some(url) = &self.cover_url {
            if url.len() > 500 {
                errors.insert(
                    "coverUrl".to_string(),
                    "Cover URL must be at most 500 characters".to_string(),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_book_and_to_explore() {
        assert_eq!(WorkType::default(), WorkType::Book);
        assert_eq!(WorkStatus::default(), WorkStatus::ToExplore);
    }

    #[test]
    fn test_blank_title_is_rejected() {
        let payload = WorkPayload {
            title: "   ".to_string(),
            ..WorkPayload::default()
        };
        let err = payload.validate().unwrap_err();
        match err {
            CoreError::FieldValidation(fields) => {
                assert_eq!(fields.get("title").unwrap(), "Title is required");
            }
            other => panic!("expected field validation, got {other:?}"),
        }
    }

    #[test]
    fn test_non_positive_total_units_is_rejected() {
        let payload = WorkPayload {
            title: "Dune".to_string(),
            total_units: Some(0),
            ..WorkPayload::default()
        };
        let err = payload.validate().unwrap_err();
        match err {
            CoreError::FieldValidation(fields) => {
                assert!(fields.contains_key("totalUnits"));
            }
            other => panic!("expected field validation, got {other:?}"),
        }
    }

    #[test]
    fn test_minimal_payload_is_valid() {
        let payload = WorkPayload {
            title: "Dune".to_string(),
            ..WorkPayload::default()
        };
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn test_enum_wire_names_are_screaming_snake() {
        let json = serde_json::to_string(&WorkStatus::ToExplore).unwrap();
        assert_eq!(json, "\"TO_EXPLORE\"");
        let json = serde_json::to_string(&WorkType::Book).unwrap();
        assert_eq!(json, "\"BOOK\"");
    }
}
