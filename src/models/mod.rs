//! Data models for the library catalog

pub mod book;
pub mod genre;
pub mod reader;
pub mod redact;
pub mod resource;
pub mod validation;

// Re-export commonly used types
pub use book::{Book, BookChanges, NewBook};
pub use genre::{Genre, GenreChanges, NewGenre};
pub use reader::{NewReader, Reader, ReaderChanges, ReaderView};
pub use redact::{redact_all, Redact, RecordView};
pub use resource::{Record, ResourceKind};
pub use validation::{map_errors, FieldViolation, WriteOutcome};
