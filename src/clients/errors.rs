//! HTTP-specific error types.
//!
//! - [`HttpResponseError`]: Non-2xx HTTP responses from the API server
//! - [`InvalidHttpRequestError`]: When a request fails validation before sending
//! - [`HttpError`]: Unified error type encompassing all transport errors
//!
//! # Example
//!
//! ```rust,ignore
//! use resource_helper::clients::{HttpClient, HttpError, RestClient};
//!
//! match client.send(request).await {
//!     Ok(body) => println!("Received {} bytes", body.len()),
//!     Err(HttpError::Response(e)) if e.is_not_found() => println!("Gone"),
//!     Err(HttpError::Response(e)) => println!("API error {}: {}", e.code, e.message),
//!     Err(e) => println!("Transport error: {e}"),
//! }
//! ```

use thiserror::Error;

/// Error returned when the API server answers with a non-successful status.
///
/// When the body is a server `Status` object, `message` and `reason` are
/// taken from it. Otherwise `message` holds the raw body text.
///
/// # Example
///
/// ```rust
/// use resource_helper::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 409,
///     message: "the object has been modified".to_string(),
///     reason: Some("Conflict".to_string()),
/// };
///
/// assert!(error.is_conflict());
/// assert_eq!(error.to_string(), "the object has been modified");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Human-readable error message.
    pub message: String,
    /// Machine-readable reason (e.g., "NotFound", "Conflict"), if provided.
    pub reason: Option<String>,
}

impl HttpResponseError {
    /// Returns `true` if the server reported the resource as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.code == 404 || self.reason.as_deref() == Some("NotFound")
    }

    /// Returns `true` if the server rejected a write on a version conflict.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        self.code == 409 || self.reason.as_deref() == Some("Conflict")
    }
}

/// Error returned when a request fails validation before it is sent.
///
/// # Example
///
/// ```rust
/// use resource_helper::clients::InvalidHttpRequestError;
///
/// let error = InvalidHttpRequestError::MissingBody {
///     method: "post".to_string(),
/// };
///
/// assert_eq!(error.to_string(), "Cannot use post without specifying data.");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A request body was provided without specifying the body type.
    #[error("Cannot set a body without also setting body_type.")]
    MissingBodyType,

    /// A POST, PUT or PATCH request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// No resource was set on the request.
    #[error("Resource must be set before sending a request.")]
    MissingResource,

    /// A name was set but is empty.
    #[error("Resource name may not be empty.")]
    EmptyName,

    /// A path segment would change the route: it contains `/` or is a dot
    /// segment (`.` or `..`).
    #[error("Invalid {kind} '{value}': may not be '.' or '..' or contain '/'.")]
    InvalidSegment {
        /// What the segment names ("namespace", "name", "resource", "prefix").
        kind: &'static str,
        /// The offending value.
        value: String,
    },
}

/// Unified error type for all transport errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A watch stream delivered a frame that is not a watch event.
    #[error("Malformed watch event: {0}")]
    MalformedEvent(#[source] serde_json::Error),

    /// A watch stream sent more bytes without a newline than one frame may hold.
    #[error("Watch frame exceeds {limit} bytes")]
    FrameTooLarge {
        /// The maximum frame size in bytes.
        limit: usize,
    },
}

impl HttpError {
    /// Returns the server response error, if this is one.
    #[must_use]
    pub const fn as_response(&self) -> Option<&HttpResponseError> {
        match self {
            Self::Response(e) => Some(e),
            _ => None,
        }
    }
}
