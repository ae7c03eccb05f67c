//! HTTP inbound adapter exposing the books REST endpoints.

use actix_web::web;

pub mod books;
pub mod envelope;
pub mod error;
pub mod schemas;
pub mod state;
pub mod validation;

pub use error::ApiResult;

/// Register the book routes and the JSON extractor configuration.
///
/// Bodies are decoded as JSON whatever their `Content-Type`.
///
/// `/books/batch` is registered ahead of the `/books/{id}` routes so the
/// literal segment is never captured as an id.
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(|err, _req| validation::json_payload_error(&err).into());

    cfg.app_data(json_config)
        .service(books::list_books)
        .service(books::create_books)
        .service(books::create_book)
        .service(books::get_book)
        .service(books::update_book)
        .service(books::delete_book);
}
