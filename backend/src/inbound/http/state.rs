//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::BookService;
use crate::domain::ports::{BookRepository, BooksCommand, BooksQuery};

/// Port implementations handed to every handler.
#[derive(Clone)]
pub struct HttpState {
    /// Read-side book use-cases.
    pub books_query: Arc<dyn BooksQuery>,
    /// Write-side book use-cases.
    pub books_command: Arc<dyn BooksCommand>,
}

impl HttpState {
    /// Build state from explicit port implementations.
    pub fn new(books_query: Arc<dyn BooksQuery>, books_command: Arc<dyn BooksCommand>) -> Self {
        Self {
            books_query,
            books_command,
        }
    }

    /// Serve both ports from one [`BookService`].
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use books_api::domain::BookService;
    /// use books_api::inbound::http::state::HttpState;
    /// use books_api::outbound::memory::InMemoryBookRepository;
    ///
    /// let service = BookService::new(Arc::new(InMemoryBookRepository::new()));
    /// let _state = HttpState::from_service(service);
    /// ```
    pub fn from_service<R>(service: BookService<R>) -> Self
    where
        R: BookRepository + 'static,
    {
        let service = Arc::new(service);
        Self::new(service.clone(), service)
    }
}
