//! Resource kinds served by the catalog and the records stored for each

use std::{fmt, str::FromStr};

use crate::error::AppError;

use super::{book::Book, genre::Genre, reader::Reader};

/// Closed set of resource types exposed by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Book,
    Genre,
    Reader,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [ResourceKind::Book, ResourceKind::Genre, ResourceKind::Reader];

    /// Singular name used in messages ("The book could not be found.")
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Book => "book",
            ResourceKind::Genre => "genre",
            ResourceKind::Reader => "reader",
        }
    }

    /// Collection path segment
    pub fn collection(&self) -> &'static str {
        match self {
            ResourceKind::Book => "books",
            ResourceKind::Genre => "genres",
            ResourceKind::Reader => "readers",
        }
    }

    /// Related resource eagerly attached when reading this kind
    pub fn related(&self) -> Option<ResourceKind> {
        match self {
            ResourceKind::Book => Some(ResourceKind::Genre),
            ResourceKind::Genre => Some(ResourceKind::Book),
            ResourceKind::Reader => None,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Parses a resource tag supplied from outside the type system. Routes are bound
/// per kind, so this is the only place an unknown tag can appear.
impl FromStr for ResourceKind {
    type Err = AppError;

    /// Accepts the singular or collection name, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.label() == lowered || kind.collection() == lowered)
            .ok_or_else(|| AppError::UnknownResourceType(s.to_string()))
    }
}

/// A stored record of any kind, as returned by a resource store
#[derive(Debug, Clone)]
pub enum Record {
    Book(Book),
    Genre(Genre),
    Reader(Reader),
}

impl Record {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Record::Book(_) => ResourceKind::Book,
            Record::Genre(_) => ResourceKind::Genre,
            Record::Reader(_) => ResourceKind::Reader,
        }
    }

    pub fn id(&self) -> i32 {
        match self {
            Record::Book(book) => book.id,
            Record::Genre(genre) => genre.id,
            Record::Reader(reader) => reader.id,
        }
    }
}

impl From<Book> for Record {
    fn from(book: Book) -> Self {
        Record::Book(book)
    }
}

impl From<Genre> for Record {
    fn from(genre: Genre) -> Self {
        Record::Genre(genre)
    }
}

impl From<Reader> for Record {
    fn from(reader: Reader) -> Self {
        Record::Reader(reader)
    }
}
