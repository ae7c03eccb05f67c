//! JSON envelope wrapping every HTTP response body.
//!
//! ```text
//! {"status":{"code":200,"message":"success"},"data":...,"errors":[],"pagination":null}
//! ```

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use pagination::Pagination;
use serde::{Deserialize, Serialize};

/// Outcome word carried in `status.message`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusWord {
    /// The request succeeded.
    Success,
    /// The request failed; see `errors`.
    Error,
}

/// Status block of the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeStatus {
    /// HTTP status code repeated in the body.
    pub code: u16,
    /// Success or error.
    pub message: StatusWord,
}

/// Uniform response wrapper.
///
/// # Examples
/// ```
/// use actix_web::http::StatusCode;
/// use books_api::inbound::http::envelope::{Envelope, StatusWord};
///
/// let envelope = Envelope::success(StatusCode::CREATED, "payload");
/// assert_eq!(envelope.status.code, 201);
/// assert_eq!(envelope.status.message, StatusWord::Success);
/// assert!(envelope.errors.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Status code and outcome word.
    pub status: EnvelopeStatus,
    /// Payload; `null` on failure and for empty successes.
    pub data: Option<T>,
    /// Error messages; empty on success.
    pub errors: Vec<String>,
    /// Page metadata for collection responses.
    pub pagination: Option<Pagination>,
}

impl<T> Envelope<T> {
    /// Successful response carrying `data`.
    pub fn success(status: StatusCode, data: T) -> Self {
        Self {
            status: EnvelopeStatus {
                code: status.as_u16(),
                message: StatusWord::Success,
            },
            data: Some(data),
            errors: Vec::new(),
            pagination: None,
        }
    }

    /// Successful response with `data: null`.
    pub fn empty(status: StatusCode) -> Self {
        Self {
            status: EnvelopeStatus {
                code: status.as_u16(),
                message: StatusWord::Success,
            },
            data: None,
            errors: Vec::new(),
            pagination: None,
        }
    }

    /// Failed response carrying a single error message.
    pub fn failure(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: EnvelopeStatus {
                code: status.as_u16(),
                message: StatusWord::Error,
            },
            data: None,
            errors: vec![message.into()],
            pagination: None,
        }
    }

    /// Attach pagination metadata.
    #[must_use]
    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl<T: Serialize> Envelope<T> {
    /// Render as an HTTP response whose status matches `status.code`.
    pub fn into_response(self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}
