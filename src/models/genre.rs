//! Genre model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{
    book::Book,
    validation::{not_blank, FieldViolation, PayloadReader},
};

/// Genre record. The genre name is unique across the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Genre {
    pub id: i32,
    pub genre: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Books filed under this genre, present when read with its association
    #[sqlx(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub books: Option<Vec<Book>>,
}

/// Create genre request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct NewGenre {
    #[validate(
        required(message = "Genre cannot be empty"),
        custom(function = "not_blank", message = "Genre cannot be empty")
    )]
    pub genre: Option<String>,
}

impl NewGenre {
    pub const FIELDS: &'static [&'static str] = &["genre"];

    pub fn from_payload(payload: &Value) -> Result<Self, Vec<FieldViolation>> {
        let mut reader = PayloadReader::new(payload)?;
        let draft = Self {
            genre: reader.string("genre").into_option(),
        };
        reader.finish(draft, Self::FIELDS)
    }
}

/// Update genre request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct GenreChanges {
    #[validate(custom(function = "not_blank", message = "Genre cannot be empty"))]
    pub genre: Option<String>,
}

impl GenreChanges {
    pub fn from_payload(payload: &Value) -> Result<Self, Vec<FieldViolation>> {
        let mut reader = PayloadReader::new(payload)?;
        let draft = Self {
            genre: reader.string("genre").into_required_patch(),
        };
        reader.finish(draft, NewGenre::FIELDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::validation::map_errors;
    use serde_json::json;

    #[test]
    fn test_new_genre() {
        let genre = NewGenre::from_payload(&json!({ "genre": "crime" })).unwrap();
        assert_eq!(genre.genre.as_deref(), Some("crime"));
    }

    #[test]
    fn test_new_genre_missing() {
        let errs = NewGenre::from_payload(&json!({})).unwrap_err();
        assert_eq!(map_errors(errs), vec!["Genre cannot be empty"]);
    }

    #[test]
    fn test_new_genre_array() {
        let errs = NewGenre::from_payload(&json!({ "genre": [1, 2, 3] })).unwrap_err();
        assert_eq!(map_errors(errs), vec!["genre cannot be an array or an object"]);
    }

    #[test]
    fn test_genre_changes_empty() {
        let errs = GenreChanges::from_payload(&json!({ "genre": "" })).unwrap_err();
        assert_eq!(map_errors(errs), vec!["Genre cannot be empty"]);
    }

    #[test]
    fn test_whitespace_genre_is_empty() {
        let errs = NewGenre::from_payload(&json!({ "genre": "   " })).unwrap_err();
        assert_eq!(map_errors(errs), vec!["Genre cannot be empty"]);

        let errs = GenreChanges::from_payload(&json!({ "genre": "\t\n" })).unwrap_err();
        assert_eq!(map_errors(errs), vec!["Genre cannot be empty"]);
    }

    #[test]
    fn test_genre_with_nul_is_rejected() {
        let errs = NewGenre::from_payload(&json!({ "genre": "sci\u{0}fi" })).unwrap_err();
        assert_eq!(map_errors(errs), vec!["genre cannot contain null characters"]);
    }

    #[test]
    fn test_genre_changes_ignores_id() {
        let changes = GenreChanges::from_payload(&json!({ "id": 99 })).unwrap();
        assert_eq!(changes.genre, None);
    }
}
