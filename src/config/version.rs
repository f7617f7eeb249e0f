//! API group/version definitions.
//!
//! This module provides the [`GroupVersion`] type naming the API group and
//! version that requests are routed to.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// An API group and version, such as `v1` (the core group) or `apps/v1`.
///
/// The core group is served under `/api`, every named group under `/apis`.
///
/// # Example
///
/// ```rust
/// use resource_helper::GroupVersion;
///
/// let core: GroupVersion = "v1".parse().unwrap();
/// assert!(core.is_core());
/// assert_eq!(core.api_path(), "/api/v1");
///
/// let apps: GroupVersion = "apps/v1".parse().unwrap();
/// assert_eq!(apps.group(), Some("apps"));
/// assert_eq!(apps.api_path(), "/apis/apps/v1");
/// assert_eq!(apps.to_string(), "apps/v1");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GroupVersion {
    group: Option<String>,
    version: String,
}

impl GroupVersion {
    /// Returns the core `v1` group/version.
    #[must_use]
    pub fn core_v1() -> Self {
        Self {
            group: None,
            version: "v1".to_string(),
        }
    }

    /// Creates a group/version for a named API group.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiVersion`] if either part is not a
    /// valid DNS-style label sequence.
    pub fn new(group: &str, version: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidApiVersion {
            version: format!("{group}/{version}"),
        };

        if !is_valid_group(group) || !is_valid_version(version) {
            return Err(invalid());
        }

        Ok(Self {
            group: Some(group.to_string()),
            version: version.to_string(),
        })
    }

    /// Returns the API group, or `None` for the core group.
    #[must_use]
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    /// Returns the version (e.g., "v1", "v1beta1").
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns `true` for the core (legacy, ungrouped) API.
    #[must_use]
    pub const fn is_core(&self) -> bool {
        self.group.is_none()
    }

    /// Returns the API root path for this group/version.
    #[must_use]
    pub fn api_path(&self) -> String {
        self.group.as_ref().map_or_else(
            || format!("/api/{}", self.version),
            |group| format!("/apis/{group}/{}", self.version),
        )
    }
}

impl Default for GroupVersion {
    fn default() -> Self {
        Self::core_v1()
    }
}

impl fmt::Display for GroupVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.group {
            None => f.write_str(&self.version),
            Some(group) => write!(f, "{group}/{}", self.version),
        }
    }
}

impl FromStr for GroupVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        match s.split_once('/') {
            None if is_valid_version(s) => Ok(Self {
                group: None,
                version: s.to_string(),
            }),
            None => Err(ConfigError::InvalidApiVersion {
                version: s.to_string(),
            }),
            Some((group, version)) => Self::new(group, version).map_err(|_| {
                ConfigError::InvalidApiVersion {
                    version: s.to_string(),
                }
            }),
        }
    }
}

fn is_valid_version(version: &str) -> bool {
    // v1, v2beta1, v1alpha3
    let Some(rest) = version.strip_prefix('v') else {
        return false;
    };
    !rest.is_empty()
        && rest.starts_with(|c: char| c.is_ascii_digit())
        && rest
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
}

fn is_valid_group(group: &str) -> bool {
    !group.is_empty()
        && group.split('.').all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        })
}
