//! Reader model and its public view

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::validation::{not_blank, FieldViolation, PayloadReader};

/// Stored reader record.
///
/// Not `Serialize`: the only outbound form is [`ReaderView`].
#[derive(Clone, FromRow)]
pub struct Reader {
    pub id: i32,
    pub name: String,
    pub email: String,
    /// Hashed password (argon2)
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Debug for Reader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reader")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// Reader as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReaderView {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Reader> for ReaderView {
    fn from(reader: Reader) -> Self {
        Self {
            id: reader.id,
            name: reader.name,
            email: reader.email,
            created_at: reader.created_at,
            updated_at: reader.updated_at,
        }
    }
}

/// Create reader request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct NewReader {
    #[validate(
        required(message = "Name cannot be empty"),
        custom(function = "not_blank", message = "Name cannot be empty")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "Email cannot be empty"),
        custom(function = "not_blank", message = "Email cannot be empty"),
        email(message = "Not a valid email")
    )]
    pub email: Option<String>,
    /// Plain-text password, 8 to 30 characters; stored hashed
    #[validate(
        required(message = "Password cannot be empty"),
        custom(function = "not_blank", message = "Password cannot be empty"),
        length(min = 8, max = 30, message = "Password must be between 8 and 30 characters")
    )]
    pub password: Option<String>,
}

impl NewReader {
    pub const FIELDS: &'static [&'static str] = &["name", "email", "password"];

    pub fn from_payload(payload: &Value) -> Result<Self, Vec<FieldViolation>> {
        let mut reader = PayloadReader::new(payload)?;
        let draft = Self {
            name: reader.string("name").into_option(),
            email: reader.string("email").into_option(),
            password: reader.string("password").into_option(),
        };
        reader.finish(draft, Self::FIELDS)
    }
}

/// Update reader request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct ReaderChanges {
    #[validate(custom(function = "not_blank", message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[validate(
        custom(function = "not_blank", message = "Email cannot be empty"),
        email(message = "Not a valid email")
    )]
    pub email: Option<String>,
    #[validate(
        custom(function = "not_blank", message = "Password cannot be empty"),
        length(min = 8, max = 30, message = "Password must be between 8 and 30 characters")
    )]
    pub password: Option<String>,
}

impl ReaderChanges {
    pub fn from_payload(payload: &Value) -> Result<Self, Vec<FieldViolation>> {
        let mut reader = PayloadReader::new(payload)?;
        let draft = Self {
            name: reader.string("name").into_required_patch(),
            email: reader.string("email").into_required_patch(),
            password: reader.string("password").into_required_patch(),
        };
        reader.finish(draft, NewReader::FIELDS)
    }
}
