//! Outbound representations with sensitive fields removed

use serde::Serialize;

use super::{
    book::Book,
    genre::Genre,
    reader::{Reader, ReaderView},
    resource::Record,
};

/// Conversion of a record into the form that may leave the service.
///
/// Redacting a view yields the same view.
pub trait Redact {
    type View: Serialize;

    fn redact(self) -> Self::View;
}

/// Redact every record, keeping order and count
pub fn redact_all<T: Redact>(records: Vec<T>) -> Vec<T::View> {
    records.into_iter().map(Redact::redact).collect()
}

/// Any record in its outbound form
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RecordView {
    Book(Book),
    Genre(Genre),
    Reader(ReaderView),
}

impl Redact for Record {
    type View = RecordView;

    fn redact(self) -> RecordView {
        match self {
            Record::Book(book) => RecordView::Book(book.redact()),
            Record::Genre(genre) => RecordView::Genre(genre.redact()),
            Record::Reader(reader) => RecordView::Reader(reader.redact()),
        }
    }
}

impl Redact for RecordView {
    type View = RecordView;

    fn redact(self) -> RecordView {
        self
    }
}

impl Redact for Reader {
    type View = ReaderView;

    fn redact(self) -> ReaderView {
        ReaderView::from(self)
    }
}

impl Redact for ReaderView {
    type View = ReaderView;

    fn redact(self) -> ReaderView {
        self
    }
}

// Books and genres hold nothing sensitive, including what they embed.
impl Redact for Book {
    type View = Book;

    fn redact(self) -> Book {
        self
    }
}

impl Redact for Genre {
    type View = Genre;

    fn redact(self) -> Genre {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn reader(id: i32) -> Reader {
        Reader {
            id,
            name: format!("Reader {}", id),
            email: format!("reader{}@example.com", id),
            password: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn genre(id: i32) -> Genre {
        Genre {
            id,
            genre: "crime".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            books: None,
        }
    }

    #[test]
    fn test_reader_record_loses_password() {
        let view = Record::from(reader(1)).redact();
        let value = serde_json::to_value(&view).unwrap();

        assert_eq!(value["id"], 1);
        assert_eq!(value["email"], "reader1@example.com");
        assert!(value.get("password").is_none());
    }

    #[test]
    fn test_redact_is_idempotent() {
        let once = Record::from(reader(2)).redact();
        let first = serde_json::to_value(&once).unwrap();
        let second = serde_json::to_value(once.redact()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_redact_all_keeps_order_and_count() {
        let records: Vec<Record> = vec![reader(3).into(), genre(4).into(), reader(5).into()];
        let views = redact_all(records);

        assert_eq!(views.len(), 3);
        let values: Vec<_> = views.iter().map(|v| serde_json::to_value(v).unwrap()).collect();
        assert_eq!(values[0]["id"], 3);
        assert_eq!(values[1]["genre"], "crime");
        assert_eq!(values[2]["id"], 5);
        assert!(values.iter().all(|v| v.get("password").is_none()));
    }

    #[test]
    fn test_genre_passes_through() {
        let value = serde_json::to_value(Record::from(genre(6)).redact()).unwrap();
        assert_eq!(value["genre"], "crime");
        assert!(value.get("books").is_none());
    }
}
