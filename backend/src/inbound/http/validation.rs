//! Shared validation helpers for inbound HTTP adapters.

use actix_web::error::JsonPayloadError;
use serde::de::DeserializeOwned;

use crate::domain::{BookId, Error};

/// Parse the `{id}` path segment into a [`BookId`].
///
/// # Examples
/// ```
/// use books_api::domain::{BookId, ErrorCode};
/// use books_api::inbound::http::validation::parse_book_id;
///
/// assert_eq!(parse_book_id("42").expect("numeric"), BookId::new(42));
/// let err = parse_book_id("forty-two").expect_err("not numeric");
/// assert_eq!(err.code(), ErrorCode::InvalidRequest);
/// ```
pub fn parse_book_id(raw: &str) -> Result<BookId, Error> {
    raw.parse::<i64>()
        .map(BookId::new)
        .map_err(|_| Error::invalid_request(format!("invalid book id: {raw:?}")))
}

/// Translate a JSON extractor failure into an `InvalidRequest` error.
pub(crate) fn json_payload_error(err: &JsonPayloadError) -> Error {
    Error::invalid_request(format!("invalid JSON body: {err}"))
}

/// Decode a raw request body as JSON.
///
/// Used where the body must be read only after other checks have run.
pub(crate) fn decode_json_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, Error> {
    serde_json::from_slice(body)
        .map_err(|err| Error::invalid_request(format!("invalid JSON body: {err}")))
}
