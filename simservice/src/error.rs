//! Error types for the sim service.

use std::fmt;
use std::num::ParseIntError;

use axum::response::{IntoResponse, Response};
use http::{Method, StatusCode, header};
use thiserror::Error;

/// Result type for service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;

/// A batch row whose identifier is not a 64-bit integer.
#[derive(Debug, Clone)]
pub struct RowError {
    pub value: String,
    pub reason: ParseIntError,
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ID {} not an int: {}", self.value, self.reason)
    }
}

/// Client-visible request failures. Each maps to one HTTP status.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// No method registered under the route.
    #[error("Method does not exist: {0}")]
    RouteNotFound(String),

    /// Request verb differs from the method's verb.
    #[error("Method type should be {0}")]
    MethodMismatch(Method),

    /// A required parameter key is absent.
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    /// A single-store operation named zero or several stores.
    #[error("Don't know how to target multiple stores at a time: {}", .0.join(", "))]
    AmbiguousTarget(Vec<String>),

    /// Parallel id/content sequences differ in length.
    #[error("Number of ids ({ids}) not equal to the number of contents ({contents})")]
    ParameterCountMismatch { ids: usize, contents: usize },

    /// The named store does not exist.
    #[error("Store does not exist: {0}")]
    StoreNotFound(String),

    /// Some insert rows carried non-integer ids. The other rows were inserted.
    #[error("{}", render_rows(.store, .failures, *.inserted, *.total))]
    IdentifierParse {
        store: String,
        failures: Vec<RowError>,
        inserted: usize,
        total: usize,
    },

    /// Request body exceeds the configured ceiling.
    #[error("Request body exceeds {0} bytes")]
    BodyTooLarge(usize),

    /// Request body could not be decoded.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// A background computation failed.
    #[error("Internal error: {0}")]
    Internal(String),
}

fn render_rows(store: &str, failures: &[RowError], inserted: usize, total: usize) -> String {
    let mut out = String::new();
    for row in failures {
        out.push_str(&row.to_string());
        out.push('\n');
    }
    out.push_str(&format!(
        "Inserted {inserted} of {total} rows into store {store}"
    ));
    out
}

impl ServiceError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::RouteNotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::MethodMismatch(_) => StatusCode::METHOD_NOT_ALLOWED,
            ServiceError::BodyTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::MissingParameter(_)
            | ServiceError::AmbiguousTarget(_)
            | ServiceError::ParameterCountMismatch { .. }
            | ServiceError::StoreNotFound(_)
            | ServiceError::IdentifierParse { .. }
            | ServiceError::InvalidBody(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        (
            self.status(),
            [
                (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
                (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
            ],
            format!("{self}\n"),
        )
            .into_response()
    }
}
