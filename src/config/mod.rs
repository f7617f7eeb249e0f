//! Client configuration types.
//!
//! This module provides the configuration used to construct the HTTP
//! transport that resource helpers send their requests through.
//!
//! # Overview
//!
//! - [`ClientConfig`]: The configuration struct holding all client settings
//! - [`ClientConfigBuilder`]: A builder for constructing [`ClientConfig`] instances
//! - [`HostUrl`]: A validated API server URL
//! - [`GroupVersion`]: The API group/version requests are routed to
//!
//! # Example
//!
//! ```rust
//! use resource_helper::{ClientConfig, GroupVersion, HostUrl};
//!
//! let config = ClientConfig::builder()
//!     .host(HostUrl::new("https://kube.example.com:6443").unwrap())
//!     .api_version("apps/v1".parse::<GroupVersion>().unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.api_version().api_path(), "/apis/apps/v1");
//! ```

mod newtypes;
mod version;

pub use newtypes::HostUrl;
pub use version::GroupVersion;

use std::time::Duration;

use crate::error::ConfigError;

/// Configuration for the HTTP transport.
///
/// # Thread Safety
///
/// `ClientConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    host: HostUrl,
    api_version: GroupVersion,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Returns the API server URL.
    #[must_use]
    pub const fn host(&self) -> &HostUrl {
        &self.host
    }

    /// Returns the API group/version.
    #[must_use]
    pub const fn api_version(&self) -> &GroupVersion {
        &self.api_version
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the per-request timeout, if configured.
    ///
    /// Watch requests are long-lived and never use this timeout.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for constructing [`ClientConfig`] instances.
///
/// `host` is required. All other fields have defaults.
///
/// # Defaults
///
/// - `api_version`: core `v1`
/// - `user_agent_prefix`: `None`
/// - `timeout`: `None`
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    host: Option<HostUrl>,
    api_version: Option<GroupVersion>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API server URL (required).
    #[must_use]
    pub fn host(mut self, host: HostUrl) -> Self {
        self.host = Some(host);
        self
    }

    /// Sets the API group/version.
    #[must_use]
    pub fn api_version(mut self, version: GroupVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`ClientConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `host` is not set.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let host = self
            .host
            .ok_or(ConfigError::MissingRequiredField { field: "host" })?;

        Ok(ClientConfig {
            host,
            api_version: self.api_version.unwrap_or_default(),
            user_agent_prefix: self.user_agent_prefix,
            timeout: self.timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_host() {
        let result = ClientConfigBuilder::new().build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "host" })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = ClientConfig::builder()
            .host(HostUrl::new("https://kube.example.com").unwrap())
            .build()
            .unwrap();

        assert_eq!(config.api_version(), &GroupVersion::core_v1());
        assert!(config.user_agent_prefix().is_none());
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = ClientConfig::builder()
            .host(HostUrl::new("https://kube.example.com").unwrap())
            .api_version("batch/v1".parse().unwrap())
            .user_agent_prefix("deployer/2.1")
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap();

        assert_eq!(config.api_version().to_string(), "batch/v1");
        assert_eq!(config.user_agent_prefix(), Some("deployer/2.1"));
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_config_is_clone_and_debug() {
        let config = ClientConfig::builder()
            .host(HostUrl::new("https://kube.example.com").unwrap())
            .build()
            .unwrap();

        let cloned = config.clone();
        assert_eq!(cloned.host(), config.host());
        assert!(format!("{config:?}").contains("ClientConfig"));
    }
}
