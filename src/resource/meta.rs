//! Typed object and list metadata.
//!
//! These types model the standard metadata envelope shared by all resources,
//! for use with [`TypedCodec`](crate::resource::TypedCodec) and
//! [`ObjectMetaAccessor`](crate::resource::ObjectMetaAccessor).

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata carried by every persisted resource.
///
/// # Example
///
/// ```rust
/// use resource_helper::resource::ObjectMeta;
///
/// let meta: ObjectMeta = serde_json::from_str(
///     r#"{"name":"web","namespace":"default","resourceVersion":"42","creationTimestamp":"2024-03-01T12:00:00Z"}"#,
/// ).unwrap();
///
/// assert_eq!(meta.resource_version.as_deref(), Some("42"));
/// assert!(meta.creation_timestamp.is_some());
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    /// Name, unique within a namespace.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Prefix used by the server to generate a unique name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generate_name: Option<String>,
    /// Namespace the object lives in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Server-assigned unique identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    /// Opaque version token used for optimistic concurrency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_version: Option<String>,
    /// Sequence number of the desired state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation: Option<i64>,
    /// When the object was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_timestamp: Option<DateTime<Utc>>,
    /// Identifying key/value pairs.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    /// Non-identifying key/value pairs.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

/// Metadata carried by list responses.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ListMeta {
    /// Version of the collection, usable as a watch starting point.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_version: Option<String>,
    /// Token for fetching the next page.
    #[serde(rename = "continue", skip_serializing_if = "Option::is_none")]
    pub continue_token: Option<String>,
}

/// A list of typed resources.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ObjectList<T> {
    /// The list's API version (e.g., "v1").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    /// The list's kind (e.g., "PodList").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// List metadata.
    #[serde(default)]
    pub metadata: ListMeta,
    /// The listed objects.
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// Implemented by typed resources that carry [`ObjectMeta`].
pub trait HasMetadata {
    /// Returns the object's metadata.
    fn metadata(&self) -> &ObjectMeta;

    /// Returns the object's metadata for modification.
    fn metadata_mut(&mut self) -> &mut ObjectMeta;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_object_meta_round_trip_skips_unset_fields() {
        let meta = ObjectMeta {
            name: Some("web".to_string()),
            resource_version: Some(String::new()),
            ..Default::default()
        };
        let json = serde_json::to_string(&meta).unwrap();
        assert_eq!(json, r#"{"name":"web","resourceVersion":""}"#);
    }

    #[test]
    fn test_creation_timestamp_parses_rfc3339() {
        let meta: ObjectMeta =
            serde_json::from_str(r#"{"creationTimestamp":"2024-03-01T12:00:00Z"}"#).unwrap();
        assert_eq!(
            meta.creation_timestamp,
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_list_meta_continue_rename() {
        let meta: ListMeta =
            serde_json::from_str(r#"{"resourceVersion":"100","continue":"abc"}"#).unwrap();
        assert_eq!(meta.continue_token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_object_list_defaults_missing_items() {
        let list: ObjectList<ObjectMeta> = serde_json::from_str(r#"{"kind":"PodList"}"#).unwrap();
        assert!(list.items.is_empty());
        assert_eq!(list.kind.as_deref(), Some("PodList"));
    }
}
