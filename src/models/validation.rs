//! Field-level validation shared by every resource store
//!
//! Raw JSON payloads are type-checked field by field first, then the typed draft
//! is run through its `validator` rules. Both stages report [`FieldViolation`]s,
//! which stores hand back as a [`WriteOutcome::Rejected`].

use serde_json::{Map, Value};
use validator::{Validate, ValidationError, ValidationErrors};

/// Message used when the request body is not a JSON object
pub const NOT_AN_OBJECT: &str = "Request body must be a JSON object";

/// `validator` rule for required text: empty or whitespace-only strings fail
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

/// A single constraint violation reported for a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Result of a write attempted against a resource store
#[derive(Debug)]
pub enum WriteOutcome<T> {
    /// The write was applied
    Written(T),
    /// Nothing was written; violations are in reported order
    Rejected(Vec<FieldViolation>),
}

/// Turn a store's violation list into the messages returned to the caller.
///
/// Order is preserved and nothing is deduplicated or rewritten.
pub fn map_errors(violations: Vec<FieldViolation>) -> Vec<String> {
    violations.into_iter().map(|v| v.message).collect()
}

/// A payload key as it was supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<T> {
    Missing,
    Null,
    Value(T),
}

impl<T> Field<T> {
    /// Value for an insert: missing and null both mean "not supplied"
    pub fn into_option(self) -> Option<T> {
        match self {
            Field::Value(v) => Some(v),
            Field::Missing | Field::Null => None,
        }
    }

    /// Change for a nullable column: `None` leaves it untouched, `Some(None)` clears it
    pub fn into_patch(self) -> Option<Option<T>> {
        match self {
            Field::Missing => None,
            Field::Null => Some(None),
            Field::Value(v) => Some(Some(v)),
        }
    }
}

impl Field<String> {
    /// Change for a required text column. Null is treated as an empty string so
    /// the non-empty rule rejects it.
    pub fn into_required_patch(self) -> Option<String> {
        match self {
            Field::Missing => None,
            Field::Null => Some(String::new()),
            Field::Value(v) => Some(v),
        }
    }
}

/// Reads typed fields out of a JSON object, collecting shape errors as it goes
pub struct PayloadReader<'a> {
    fields: &'a Map<String, Value>,
    violations: Vec<FieldViolation>,
}

impl<'a> PayloadReader<'a> {
    pub fn new(payload: &'a Value) -> Result<Self, Vec<FieldViolation>> {
        match payload.as_object() {
            Some(fields) => Ok(Self {
                fields,
                violations: Vec::new(),
            }),
            None => Err(vec![FieldViolation::new("", NOT_AN_OBJECT)]),
        }
    }

    /// Read a text field. Numbers and booleans are accepted in their text form.
    pub fn string(&mut self, key: &str) -> Field<String> {
        match self.fields.get(key) {
            None => Field::Missing,
            Some(Value::Null) => Field::Null,
            Some(Value::String(s)) if s.contains('\0') => {
                self.reject(key, format!("{key} cannot contain null characters"));
                Field::Missing
            }
            Some(Value::String(s)) => Field::Value(s.clone()),
            Some(Value::Number(n)) => Field::Value(n.to_string()),
            Some(Value::Bool(b)) => Field::Value(b.to_string()),
            Some(Value::Array(_)) | Some(Value::Object(_)) => {
                self.reject(key, format!("{key} cannot be an array or an object"));
                Field::Missing
            }
        }
    }

    /// Read an integer field. Numeric strings are accepted, a blank string is null.
    pub fn integer<T: TryFrom<i64>>(&mut self, key: &str) -> Field<T> {
        let parsed = match self.fields.get(key) {
            None => return Field::Missing,
            Some(Value::Null) => return Field::Null,
            Some(Value::String(s)) if s.trim().is_empty() => return Field::Null,
            Some(Value::Number(n)) => n.as_i64(),
            Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
            Some(_) => None,
        };

        match parsed.and_then(|v| T::try_from(v).ok()) {
            Some(value) => Field::Value(value),
            None => {
                self.reject(key, format!("{key} must be an integer"));
                Field::Missing
            }
        }
    }

    fn reject(&mut self, key: &str, message: String) {
        self.violations.push(FieldViolation::new(key, message));
    }

    /// Validate the typed draft and return it, or every violation found.
    ///
    /// Shape errors come first. Rule errors follow in `order`; a field that
    /// already failed its shape check reports nothing further.
    pub fn finish<T: Validate>(self, draft: T, order: &[&str]) -> Result<T, Vec<FieldViolation>> {
        let mut violations = self.violations;

        if let Err(errors) = draft.validate() {
            let shape_failed: Vec<String> = violations.iter().map(|v| v.field.clone()).collect();
            violations.extend(
                ordered_violations(&errors, order)
                    .into_iter()
                    .filter(|v| !shape_failed.contains(&v.field)),
            );
        }

        if violations.is_empty() {
            Ok(draft)
        } else {
            Err(violations)
        }
    }
}

/// Flatten `validator` errors into violations following the schema field order.
/// Fields missing from `order` come last, by name.
fn ordered_violations(errors: &ValidationErrors, order: &[&str]) -> Vec<FieldViolation> {
    let by_field = errors.field_errors();

    let mut extra: Vec<String> = by_field
        .keys()
        .map(|k| k.to_string())
        .filter(|k| !order.contains(&k.as_str()))
        .collect();
    extra.sort();

    let mut violations = Vec::new();
    for field in order.iter().map(|f| f.to_string()).chain(extra) {
        if let Some(errs) = by_field.get(field.as_str()) {
            for e in errs.iter() {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                violations.push(FieldViolation::new(field.clone(), message));
            }
        }
    }
    violations
}
