//! Error types for resource helper operations.
//!
//! Every public [`Helper`](crate::resource::Helper) operation returns a single
//! [`HelperError`]. Failures the helper can recover from on its own (a payload
//! it cannot decode, a version it cannot read on the caller's object, a failed
//! lookup during an overwrite) are logged and never surface here.
//!
//! # Example
//!
//! ```rust,ignore
//! use resource_helper::resource::HelperError;
//!
//! match helper.replace("default", "web", true, &payload).await {
//!     Ok(object) => println!("Replaced: {object}"),
//!     Err(HelperError::ServerVersion { name, source }) => {
//!         println!("Server copy of {name} has an unreadable version: {source}");
//!     }
//!     Err(e) if e.is_conflict() => println!("Lost an update race, retry"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::{HttpError, HttpResponseError, InvalidHttpRequestError};
use crate::resource::codec::CodecError;
use crate::resource::versioner::VersionError;

/// Error type for resource helper operations.
#[derive(Debug, Error)]
pub enum HelperError {
    /// The transport failed or the server rejected the request.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The server response could not be decoded.
    #[error("Failed to decode server response: {0}")]
    ResponseDecode(#[source] CodecError),

    /// The version of an object being created could not be cleared.
    #[error("Failed to clear resource version: {0}")]
    ClearVersion(#[source] VersionError),

    /// The server's copy of an object being overwritten has an unreadable version.
    #[error("Failed to read resource version of server object '{name}': {source}")]
    ServerVersion {
        /// The name of the object being replaced.
        name: String,
        /// The underlying version error.
        source: VersionError,
    },

    /// The server's version could not be applied to the caller's object.
    #[error("Failed to apply server resource version to '{name}': {source}")]
    AdoptVersion {
        /// The name of the object being replaced.
        name: String,
        /// The underlying version error.
        source: VersionError,
    },

    /// An object could not be encoded after its version was changed.
    #[error("Failed to encode resource: {0}")]
    Encode(#[source] CodecError),

    /// The server ended a watch with an error event.
    #[error("Watch failed: {0}")]
    Watch(HttpResponseError),
}

impl From<InvalidHttpRequestError> for HelperError {
    fn from(error: InvalidHttpRequestError) -> Self {
        Self::Http(HttpError::InvalidRequest(error))
    }
}

impl HelperError {
    /// Returns the server response error behind this error, if any.
    #[must_use]
    pub const fn as_response(&self) -> Option<&HttpResponseError> {
        match self {
            Self::Http(e) => e.as_response(),
            Self::Watch(e) => Some(e),
            _ => None,
        }
    }

    /// Returns `true` if the server reported the object as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.as_response()
            .is_some_and(HttpResponseError::is_not_found)
    }

    /// Returns `true` if the server rejected the write on a version conflict.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        self.as_response()
            .is_some_and(HttpResponseError::is_conflict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_version_error_names_object() {
        let error = HelperError::ServerVersion {
            name: "web".to_string(),
            source: VersionError::InvalidResourceVersion,
        };
        let message = error.to_string();
        assert!(message.contains("'web'"));
        assert!(message.contains("resourceVersion"));
    }

    #[test]
    fn test_adopt_version_error_has_source() {
        let error = HelperError::AdoptVersion {
            name: "web".to_string(),
            source: VersionError::NotAnObject,
        };
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_invalid_request_converts_to_http_error() {
        let error: HelperError = InvalidHttpRequestError::EmptyName.into();
        assert!(matches!(
            error,
            HelperError::Http(HttpError::InvalidRequest(
                InvalidHttpRequestError::EmptyName
            ))
        ));
    }

    #[test]
    fn test_conflict_and_not_found_helpers() {
        let conflict = HelperError::Http(HttpError::Response(HttpResponseError {
            code: 409,
            message: "the object has been modified".to_string(),
            reason: Some("Conflict".to_string()),
        }));
        assert!(conflict.is_conflict());
        assert!(!conflict.is_not_found());

        let gone = HelperError::Watch(HttpResponseError {
            code: 410,
            message: "too old resource version".to_string(),
            reason: Some("Expired".to_string()),
        });
        assert_eq!(gone.as_response().map(|e| e.code), Some(410));
        assert!(!gone.is_not_found());

        let encode = HelperError::Encode(CodecError::Custom("boom".to_string()));
        assert!(encode.as_response().is_none());
    }
}
