use rocket::http::Status;
use rocket::response::status;
use rocket::serde::json::Json;
use serde_json::{json, Value};
use std::fmt;

/// Request-scoped failure. Every variant is terminal: nothing is retried
/// and no partial result is ever returned to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A required provider credential is absent.
    Configuration(String),
    /// Non-success status or transport failure from an outbound call,
    /// surfaced with the provider's own detail text.
    Provider(String),
    /// Sanitized text contains no candidate JSON object.
    NoJsonFound,
    /// Candidate span failed to decode after all sanitization ran.
    MalformedJson(String),
    /// Structural validation: a required top-level key is absent.
    MissingField(String),
    /// Structural validation: a checked field has the wrong shape.
    InvalidShape(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Configuration(what) => write!(f, "Missing {} credential", what),
            Error::Provider(detail) => write!(f, "{}", detail),
            Error::NoJsonFound => write!(f, "No valid JSON found in provider response"),
            Error::MalformedJson(detail) => {
                write!(f, "Provider returned invalid JSON: {}", detail)
            }
            Error::MissingField(key) => write!(f, "Missing key: {}", key),
            Error::InvalidShape(field) => write!(f, "Invalid shape for field: {}", field),
        }
    }
}

impl Error {
    /// Surface the failure as a 500 response with a human-readable message.
    pub fn into_response(self) -> status::Custom<Json<Value>> {
        status::Custom(
            Status::InternalServerError,
            Json(json!({ "error": self.to_string() })),
        )
    }
}

/// JSON route result: a success body, or an error status carrying
/// `{"error": "..."}`.
pub type ApiResult = Result<Json<Value>, status::Custom<Json<Value>>>;
