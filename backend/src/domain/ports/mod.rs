//! Domain ports defining the edges of the hexagon.
//!
//! Driving ports ([`BooksQuery`], [`BooksCommand`]) are what inbound adapters
//! call. Driven ports ([`BookRepository`]) are what storage adapters
//! implement; their errors are strongly typed so adapters map failures into
//! predictable variants.

mod book_repository;
mod books;
mod macros;

pub(crate) use macros::define_port_error;

#[cfg(test)]
pub use book_repository::MockBookRepository;
pub use book_repository::{BookRepository, BookRepositoryError};
pub use books::{BooksCommand, BooksQuery};
