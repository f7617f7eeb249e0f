//! Reading and writing the version token of a decoded object.
//!
//! The version token is the opaque `metadata.resourceVersion` string the
//! server uses for optimistic concurrency. An empty token means the object
//! carries no observed version.

use thiserror::Error;

use crate::resource::meta::HasMetadata;

/// Error returned when an object's version token cannot be read or written.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// The object is not a JSON object.
    #[error("object is not a JSON object")]
    NotAnObject,

    /// The object's `metadata` field is not a JSON object.
    #[error("metadata is not a JSON object")]
    InvalidMetadata,

    /// The object's `metadata.resourceVersion` field is not a string.
    #[error("metadata.resourceVersion is not a string")]
    InvalidResourceVersion,

    /// A versioner-specific failure.
    #[error("{0}")]
    Custom(String),
}

/// Reads and writes the version token of objects of type `O`.
pub trait ResourceVersioner<O>: Send + Sync {
    /// Returns the object's version token, or `""` if it has none.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError`] if the object has no readable version field.
    fn resource_version(&self, object: &O) -> Result<String, VersionError>;

    /// Sets the object's version token. `""` clears it.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError`] if the object has no writable version field.
    fn set_resource_version(&self, object: &mut O, version: &str) -> Result<(), VersionError>;
}

/// Versioner for untyped JSON objects.
///
/// Reads `metadata.resourceVersion`; a missing `metadata` or missing field
/// reads as `""`. Setting a version creates `metadata` when absent and always
/// writes the field, so a cleared token stays present as `""`.
///
/// # Example
///
/// ```rust
/// use resource_helper::resource::{JsonMetadataAccessor, ResourceVersioner};
/// use serde_json::json;
///
/// let mut object = json!({"kind": "Pod", "metadata": {"resourceVersion": "42"}});
/// assert_eq!(JsonMetadataAccessor.resource_version(&object).unwrap(), "42");
///
/// JsonMetadataAccessor.set_resource_version(&mut object, "").unwrap();
/// assert_eq!(object["metadata"]["resourceVersion"], "");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JsonMetadataAccessor;

impl ResourceVersioner<serde_json::Value> for JsonMetadataAccessor {
    fn resource_version(&self, object: &serde_json::Value) -> Result<String, VersionError> {
        let root = object.as_object().ok_or(VersionError::NotAnObject)?;
        let Some(metadata) = root.get("metadata") else {
            return Ok(String::new());
        };
        let metadata = metadata.as_object().ok_or(VersionError::InvalidMetadata)?;
        match metadata.get("resourceVersion") {
            None | Some(serde_json::Value::Null) => Ok(String::new()),
            Some(serde_json::Value::String(version)) => Ok(version.clone()),
            Some(_) => Err(VersionError::InvalidResourceVersion),
        }
    }

    fn set_resource_version(
        &self,
        object: &mut serde_json::Value,
        version: &str,
    ) -> Result<(), VersionError> {
        let root = object.as_object_mut().ok_or(VersionError::NotAnObject)?;
        let metadata = root
            .entry("metadata")
            .or_insert_with(|| serde_json::Value::Object(serde_json::Map::new()))
            .as_object_mut()
            .ok_or(VersionError::InvalidMetadata)?;
        metadata.insert(
            "resourceVersion".to_string(),
            serde_json::Value::String(version.to_string()),
        );
        Ok(())
    }
}

/// Versioner for typed objects that carry [`ObjectMeta`](crate::resource::ObjectMeta).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ObjectMetaAccessor;

impl<T: HasMetadata> ResourceVersioner<T> for ObjectMetaAccessor {
    fn resource_version(&self, object: &T) -> Result<String, VersionError> {
        Ok(object
            .metadata()
            .resource_version
            .clone()
            .unwrap_or_default())
    }

    fn set_resource_version(&self, object: &mut T, version: &str) -> Result<(), VersionError> {
        object.metadata_mut().resource_version = Some(version.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::meta::ObjectMeta;
    use serde_json::json;

    #[test]
    fn test_missing_metadata_reads_as_empty() {
        let object = json!({"kind": "Namespace"});
        assert_eq!(JsonMetadataAccessor.resource_version(&object).unwrap(), "");
    }

    #[test]
    fn test_missing_or_null_field_reads_as_empty() {
        let object = json!({"metadata": {"name": "web"}});
        assert_eq!(JsonMetadataAccessor.resource_version(&object).unwrap(), "");

        let object = json!({"metadata": {"resourceVersion": null}});
        assert_eq!(JsonMetadataAccessor.resource_version(&object).unwrap(), "");
    }

    #[test]
    fn test_read_errors() {
        assert_eq!(
            JsonMetadataAccessor.resource_version(&json!([1, 2])),
            Err(VersionError::NotAnObject)
        );
        assert_eq!(
            JsonMetadataAccessor.resource_version(&json!({"metadata": "web"})),
            Err(VersionError::InvalidMetadata)
        );
        assert_eq!(
            JsonMetadataAccessor.resource_version(&json!({"metadata": {"resourceVersion": 42}})),
            Err(VersionError::InvalidResourceVersion)
        );
    }

    #[test]
    fn test_set_creates_metadata() {
        let mut object = json!({"kind": "Pod"});
        JsonMetadataAccessor
            .set_resource_version(&mut object, "7")
            .unwrap();
        assert_eq!(
            object,
            json!({"kind": "Pod", "metadata": {"resourceVersion": "7"}})
        );
    }

    #[test]
    fn test_set_keeps_other_fields() {
        let mut object = json!({"metadata": {"name": "web", "resourceVersion": "42"}, "spec": {}});
        JsonMetadataAccessor
            .set_resource_version(&mut object, "")
            .unwrap();
        assert_eq!(
            object,
            json!({"metadata": {"name": "web", "resourceVersion": ""}, "spec": {}})
        );
    }

    #[test]
    fn test_set_rejects_non_object_metadata() {
        let mut object = json!({"metadata": 5});
        assert_eq!(
            JsonMetadataAccessor.set_resource_version(&mut object, "1"),
            Err(VersionError::InvalidMetadata)
        );
        let mut object = json!("pod");
        assert_eq!(
            JsonMetadataAccessor.set_resource_version(&mut object, "1"),
            Err(VersionError::NotAnObject)
        );
    }

    #[test]
    fn test_object_meta_accessor() {
        struct Secret {
            metadata: ObjectMeta,
        }
        impl HasMetadata for Secret {
            fn metadata(&self) -> &ObjectMeta {
                &self.metadata
            }
            fn metadata_mut(&mut self) -> &mut ObjectMeta {
                &mut self.metadata
            }
        }

        let mut secret = Secret {
            metadata: ObjectMeta::default(),
        };
        assert_eq!(ObjectMetaAccessor.resource_version(&secret).unwrap(), "");

        ObjectMetaAccessor
            .set_resource_version(&mut secret, "12")
            .unwrap();
        assert_eq!(ObjectMetaAccessor.resource_version(&secret).unwrap(), "12");
        assert_eq!(secret.metadata.resource_version.as_deref(), Some("12"));
    }
}
