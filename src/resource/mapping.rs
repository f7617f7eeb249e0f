//! REST mappings describe how a resource type is addressed and encoded.

use crate::error::ConfigError;

/// Whether a resource type lives inside namespaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RestScope {
    /// Objects are addressed as `namespaces/{namespace}/{resource}`.
    Namespace,
    /// Objects are addressed as `{resource}` (cluster-wide).
    Root,
}

impl RestScope {
    /// Returns `true` for [`RestScope::Namespace`].
    #[must_use]
    pub const fn is_namespaced(self) -> bool {
        matches!(self, Self::Namespace)
    }
}

/// Everything a [`Helper`](crate::resource::Helper) needs to know about a
/// resource type besides the transport.
///
/// # Example
///
/// ```rust
/// use resource_helper::resource::{JsonCodec, JsonMetadataAccessor, RestMapping, RestScope};
///
/// let mapping = RestMapping::new("deployments", RestScope::Namespace, JsonCodec, JsonMetadataAccessor).unwrap();
/// assert_eq!(mapping.resource(), "deployments");
/// assert!(mapping.scope().is_namespaced());
///
/// assert!(RestMapping::new("", RestScope::Root, JsonCodec, JsonMetadataAccessor).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct RestMapping<C, V> {
    resource: String,
    scope: RestScope,
    codec: C,
    versioner: V,
}

impl<C, V> RestMapping<C, V> {
    /// Creates a mapping for the named resource type.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyResourceName`] if `resource` is empty.
    pub fn new(
        resource: impl Into<String>,
        scope: RestScope,
        codec: C,
        versioner: V,
    ) -> Result<Self, ConfigError> {
        let resource = resource.into();
        if resource.is_empty() {
            return Err(ConfigError::EmptyResourceName);
        }
        Ok(Self {
            resource,
            scope,
            codec,
            versioner,
        })
    }

    /// Returns the resource type name.
    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Returns the scope of the resource type.
    #[must_use]
    pub const fn scope(&self) -> RestScope {
        self.scope
    }

    /// Returns the codec.
    #[must_use]
    pub const fn codec(&self) -> &C {
        &self.codec
    }

    /// Returns the versioner.
    #[must_use]
    pub const fn versioner(&self) -> &V {
        &self.versioner
    }

    /// Splits the mapping into its parts.
    pub fn into_parts(self) -> (String, RestScope, C, V) {
        (self.resource, self.scope, self.codec, self.versioner)
    }
}
