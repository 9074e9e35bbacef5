//! Book model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{
    genre::Genre,
    validation::{not_blank, FieldViolation, PayloadReader},
};

/// Book record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    #[serde(rename = "ISBN")]
    pub isbn: Option<i64>,
    /// Genre this book is filed under
    pub genre_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Attached genre, present when read with its association
    #[sqlx(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<Genre>,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct NewBook {
    #[validate(
        required(message = "Title cannot be empty"),
        custom(function = "not_blank", message = "Title cannot be empty")
    )]
    pub title: Option<String>,
    #[validate(
        required(message = "Author cannot be empty"),
        custom(function = "not_blank", message = "Author cannot be empty")
    )]
    pub author: Option<String>,
    #[serde(rename = "ISBN")]
    pub isbn: Option<i64>,
    pub genre_id: Option<i32>,
}

impl NewBook {
    pub const FIELDS: &'static [&'static str] = &["title", "author", "isbn", "genre_id"];

    pub fn from_payload(payload: &Value) -> Result<Self, Vec<FieldViolation>> {
        let mut reader = PayloadReader::new(payload)?;
        let draft = Self {
            title: reader.string("title").into_option(),
            author: reader.string("author").into_option(),
            isbn: reader.integer("ISBN").into_option(),
            genre_id: reader.integer("genre_id").into_option(),
        };
        reader.finish(draft, Self::FIELDS)
    }
}

/// Update book request. Only supplied fields change; `null` clears ISBN or genre.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct BookChanges {
    #[validate(custom(function = "not_blank", message = "Title cannot be empty"))]
    pub title: Option<String>,
    #[validate(custom(function = "not_blank", message = "Author cannot be empty"))]
    pub author: Option<String>,
    #[serde(rename = "ISBN")]
    #[schema(value_type = Option<i64>)]
    pub isbn: Option<Option<i64>>,
    #[schema(value_type = Option<i32>)]
    pub genre_id: Option<Option<i32>>,
}

impl BookChanges {
    pub fn from_payload(payload: &Value) -> Result<Self, Vec<FieldViolation>> {
        let mut reader = PayloadReader::new(payload)?;
        let draft = Self {
            title: reader.string("title").into_required_patch(),
            author: reader.string("author").into_required_patch(),
            isbn: reader.integer("ISBN").into_patch(),
            genre_id: reader.integer("genre_id").into_patch(),
        };
        reader.finish(draft, NewBook::FIELDS)
    }
}
