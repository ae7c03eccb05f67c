//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every book endpoint together with the envelope
//! schema wrappers from [`crate::inbound::http::schemas`]. The document is
//! served by Swagger UI in debug builds and exported via
//! `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::books::{
    BatchCreatedResponseBody, BookResponseBody, CreateBookRequestBody, UpdateBookRequestBody,
};
use crate::inbound::http::schemas::{
    BatchEnvelopeSchema, BookEnvelopeSchema, BookListEnvelopeSchema, EmptyEnvelopeSchema,
    EnvelopeStatusSchema, PaginationSchema, StatusWordSchema,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Books API",
        description = "CRUD and batch insert over a single collection of books."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::books::list_books,
        crate::inbound::http::books::get_book,
        crate::inbound::http::books::create_book,
        crate::inbound::http::books::create_books,
        crate::inbound::http::books::update_book,
        crate::inbound::http::books::delete_book,
    ),
    components(schemas(
        BookResponseBody,
        CreateBookRequestBody,
        UpdateBookRequestBody,
        BatchCreatedResponseBody,
        StatusWordSchema,
        EnvelopeStatusSchema,
        PaginationSchema,
        BookEnvelopeSchema,
        BookListEnvelopeSchema,
        BatchEnvelopeSchema,
        EmptyEnvelopeSchema,
    )),
    tags(
        (name = "books", description = "Operations on the book collection")
    )
)]
pub struct ApiDoc;
