//! Review entity model and DTOs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use shelflife_core::error::CoreError;
use shelflife_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Maximum review title length in characters.
const MAX_TITLE_LEN: usize = 255;

/// Full review row from the `reviews` table.
///
/// At most one row exists per `(user_id, work_id)` pair.
#[derive(Debug, Clone, FromRow)]
pub struct Review {
    pub id: DbId,
    pub user_id: DbId,
    pub work_id: DbId,
    pub rating: i32,
    pub title: Option<String>,
    pub body: Option<String>,
    pub is_private: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Review representation for API responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub id: DbId,
    pub work_id: DbId,
    pub rating: i32,
    pub title: Option<String>,
    pub body: Option<String>,
    pub is_private: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.id,
            work_id: review.work_id,
            rating: review.rating,
            title: review.title,
            body: review.body,
            is_private: review.is_private,
            created_at: review.created_at,
            updated_at: review.updated_at,
        }
    }
}

/// Upsert request body for `PUT /api/works/{id}/review`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPayload {
    pub rating: Option<i32>,
    pub title: Option<String>,
    pub body: Option<String>,
    #[serde(default)]
    pub is_private: bool,
}

impl ReviewPayload {
    /// Validate before any write; a missing rating fails the same way as an
    /// out-of-range one.
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut errors = BTreeMap::new();

        match self.rating {
            Some(rating) if (1..=5).contains(&rating) => {}
            _ => {
                errors.insert(
                    "rating".to_string(),
                    "Rating must be between 1 and 5".to_string(),
                );
            }
        }
        if let Some(title) = &self.title {
            if title.len() > MAX_TITLE_LEN {
                errors.insert(
                    "title".to_string(),
                    format!("Title must be at most {MAX_TITLE_LEN} characters"),
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
    fn test_rating_bounds() {
        for rating in [1, 3, 5] {
            let payload = ReviewPayload {
                rating: Some(rating),
                ..ReviewPayload::default()
            };
            assert!(payload.validate().is_ok(), "rating {rating} should pass");
        }
        for rating in [0, 6, -1] {
            let payload = ReviewPayload {
                rating: Some(rating),
                ..ReviewPayload::default()
            };
            assert!(payload.validate().is_err(), "rating {rating} should fail");
        }
    }

    #[test]
    fn test_missing_rating_is_rejected() {
        let err = ReviewPayload::default().validate().unwrap_err();
        match err {
            CoreError::FieldValidation(fields) => {
                assert_eq!(fields.get("rating").unwrap(), "Rating must be between 1 and 5");
            }
            other => panic!("expected field validation, got {other:?}"),
        }
    }
}
