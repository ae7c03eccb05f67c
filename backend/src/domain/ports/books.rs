//! Driving ports for book use-cases.
//!
//! HTTP handlers depend on these traits rather than on a repository so they
//! only ever see domain errors.

use async_trait::async_trait;

use crate::domain::{Book, BookId, BookPatch, Error, NewBook};

/// Read-side book use-cases.
#[async_trait]
pub trait BooksQuery: Send + Sync {
    /// Every live book, ordered by identifier.
    async fn list_books(&self) -> Result<Vec<Book>, Error>;

    /// A single book; `NotFound` when absent.
    async fn get_book(&self, id: BookId) -> Result<Book, Error>;
}

/// Write-side book use-cases.
#[async_trait]
pub trait BooksCommand: Send + Sync {
    /// Insert one book.
    async fn create_book(&self, book: NewBook) -> Result<Book, Error>;

    /// Insert a batch atomically; `Conflict` leaves the store untouched.
    async fn create_books(&self, books: Vec<NewBook>) -> Result<Vec<Book>, Error>;

    /// Merge `patch` over the stored book `id`.
    async fn update_book(&self, id: BookId, patch: BookPatch) -> Result<Book, Error>;

    /// Delete book `id`.
    async fn delete_book(&self, id: BookId) -> Result<(), Error>;
}
