//! Configuration error types for the resource helper.
//!
//! This module contains the error type returned when building client
//! configuration, validated newtypes, and REST mappings.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use resource_helper::{ConfigError, HostUrl};
//!
//! let result = HostUrl::new("localhost:6443");
//! assert!(matches!(result, Err(ConfigError::InvalidHostUrl { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring a client or a resource mapping.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Host URL is invalid.
    #[error("Invalid host URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://api.example.com:6443').")]
    InvalidHostUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// API group/version is invalid.
    #[error("Invalid API version '{version}'. Expected format: 'v1' or 'group/v1'.")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// A resource mapping was created without a resource name.
    #[error("Resource name cannot be empty. Please provide the resource name the server recognizes (e.g., 'pods').")]
    EmptyResourceName,

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}
