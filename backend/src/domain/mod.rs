//! Domain primitives, ports and services.
//!
//! Purpose: define the book entity and the use-cases over it without any
//! transport or storage concerns.
//!
//! Public surface:
//! - Book, BookId, NewBook, BookPatch: the entity and its write shapes.
//! - BookService: implements the driving ports over a repository.
//! - Error (alias to `error::DomainError`), ErrorCode: transport-agnostic failures.
//! - TraceId: request correlation identifier.

pub mod book;
pub mod book_service;
pub mod error;
pub mod ports;
pub mod trace_id;

pub use self::book::{Book, BookId, BookPatch, NewBook};
pub use self::book_service::BookService;
pub use self::error::{DomainError, Error, ErrorCode};
pub use self::trace_id::TraceId;

/// Response header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";
