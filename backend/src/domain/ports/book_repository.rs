//! Driven port for book persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Book, BookId, NewBook};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by book repository adapters.
    pub enum BookRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "book repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "book repository query failed: {message}",
        /// A uniqueness or other integrity constraint rejected the write.
        Conflict { message: String } => "book repository conflict: {message}",
        /// No live row exists for the identifier.
        NotFound { id: i64 } => "book {id} not found",
    }
}

/// Single-table storage for [`Book`] records.
///
/// Deleted rows are invisible to every method. Implementations must be safe
/// to share across request workers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// All live books ordered by identifier.
    async fn list(&self) -> Result<Vec<Book>, BookRepositoryError>;

    /// Fetch a live book by identifier.
    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, BookRepositoryError>;

    /// Insert one book, assigning an identifier when the store owns them.
    async fn create(&self, book: &NewBook) -> Result<Book, BookRepositoryError>;

    /// Insert every book or none of them.
    async fn create_many(&self, books: &[NewBook]) -> Result<Vec<Book>, BookRepositoryError>;

    /// Replace the mutable fields of live row `id` with those of `book`.
    ///
    /// The stored identifier is always `id`, whatever `book.id` holds.
    async fn update(&self, id: BookId, book: &Book) -> Result<Book, BookRepositoryError>;

    /// Remove live row `id`.
    async fn delete(&self, id: BookId) -> Result<(), BookRepositoryError>;
}
