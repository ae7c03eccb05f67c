//! Book entity and the value types used to create and modify it.

use std::fmt;

use chrono::{DateTime, Utc};

/// Numeric book identifier assigned by the store or supplied by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookId(i64);

impl BookId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<BookId> for i64 {
    fn from(value: BookId) -> Self {
        value.0
    }
}

/// A persisted book record.
///
/// `created_at` and `updated_at` are owned by the store; callers never set
/// them directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    /// Store identifier.
    pub id: BookId,
    /// Book title; unique among live books unless the store opts out.
    pub title: String,
    /// Author name.
    pub author: String,
    /// Publication year.
    pub year: i32,
    /// Insertion time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when inserting a book.
///
/// `id` is honoured only by stores that accept client-chosen identifiers; the
/// relational store always assigns its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    /// Client-chosen identifier, if any.
    pub id: Option<BookId>,
    /// Book title.
    pub title: String,
    /// Author name.
    pub author: String,
    /// Publication year.
    pub year: i32,
}

/// Merge patch for an existing book. Absent fields keep their stored value.
///
/// # Examples
/// ```
/// use books_api::domain::BookPatch;
///
/// let patch = BookPatch { year: Some(1966), ..BookPatch::default() };
/// assert!(!patch.is_empty());
/// assert!(BookPatch::default().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookPatch {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement author.
    pub author: Option<String>,
    /// Replacement publication year.
    pub year: Option<i32>,
}

impl BookPatch {
    /// Return `true` when the patch carries no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.year.is_none()
    }

    /// Apply the present fields onto `book` and pin its identifier to `id`.
    #[must_use]
    pub fn apply_to(self, mut book: Book, id: BookId) -> Book {
        if let Some(title) = self.title {
            book.title = title;
        }
        if let Some(author) = self.author {
            book.author = author;
        }
        if let Some(year) = self.year {
            book.year = year;
        }
        book.id = id;
        book
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn dune() -> Book {
        let now = Utc::now();
        Book {
            id: BookId::new(1),
            title: "Dune".to_owned(),
            author: "Frank Herbert".to_owned(),
            year: 1965,
            created_at: now,
            updated_at: now,
        }
    }

    #[rstest]
    fn empty_patch_only_pins_id(dune: Book) {
        let patched = BookPatch::default().apply_to(dune.clone(), BookId::new(1));
        assert_eq!(patched, dune);
    }

    #[rstest]
    fn present_fields_replace_stored_values(dune: Book) {
        let patch = BookPatch {
            title: Some("Dune Messiah".to_owned()),
            year: Some(1969),
            ..BookPatch::default()
        };

        let patched = patch.apply_to(dune, BookId::new(1));

        assert_eq!(patched.title, "Dune Messiah");
        assert_eq!(patched.author, "Frank Herbert");
        assert_eq!(patched.year, 1969);
    }

    #[rstest]
    fn id_is_forced_to_target(dune: Book) {
        let patched = BookPatch::default().apply_to(dune, BookId::new(42));
        assert_eq!(patched.id, BookId::new(42));
    }

    #[rstest]
    fn zero_values_are_applied_not_ignored(dune: Book) {
        let patch = BookPatch {
            title: Some(String::new()),
            year: Some(0),
            ..BookPatch::default()
        };

        let patched = patch.apply_to(dune, BookId::new(1));

        assert_eq!(patched.title, "");
        assert_eq!(patched.year, 0);
    }
}
