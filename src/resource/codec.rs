//! Encoding and decoding of resource payloads.
//!
//! A [`Codec`] turns wire bytes into the in-memory object a helper works on
//! and back. Two implementations are provided:
//!
//! - [`JsonCodec`]: untyped, objects are [`serde_json::Value`]
//! - [`TypedCodec`]: typed, objects are any serde type and lists are
//!   [`ObjectList`]

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::clients::ContentType;
use crate::resource::meta::ObjectList;

/// Error returned when a payload cannot be decoded or an object cannot be encoded.
#[derive(Debug, Error)]
pub enum CodecError {
    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A codec-specific failure.
    #[error("{0}")]
    Custom(String),
}

/// Converts between encoded payloads and in-memory objects.
///
/// Implementations must be safe to use from many tasks at once.
pub trait Codec: Send + Sync {
    /// A single decoded resource.
    type Object: Send;
    /// A decoded collection of resources.
    type List: Send;

    /// Decodes a single object.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] if the bytes do not describe an object.
    fn decode(&self, data: &[u8]) -> Result<Self::Object, CodecError>;

    /// Encodes a single object.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] if the object cannot be represented.
    fn encode(&self, object: &Self::Object) -> Result<Vec<u8>, CodecError>;

    /// Decodes a list response.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] if the bytes do not describe a list.
    fn decode_list(&self, data: &[u8]) -> Result<Self::List, CodecError>;

    /// The content type encoded objects are sent with.
    fn content_type(&self) -> ContentType {
        ContentType::Json
    }
}

/// Untyped JSON codec. Key order of decoded objects is preserved on encode.
///
/// # Example
///
/// ```rust
/// use resource_helper::resource::{Codec, JsonCodec};
///
/// let object = JsonCodec.decode(br#"{"kind":"Pod","metadata":{"name":"web"}}"#).unwrap();
/// assert_eq!(object["metadata"]["name"], "web");
/// assert_eq!(JsonCodec.encode(&object).unwrap(), br#"{"kind":"Pod","metadata":{"name":"web"}}"#);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    type Object = serde_json::Value;
    type List = serde_json::Value;

    fn decode(&self, data: &[u8]) -> Result<Self::Object, CodecError> {
        Ok(serde_json::from_slice(data)?)
    }

    fn encode(&self, object: &Self::Object) -> Result<Vec<u8>, CodecError> {
        Ok(serde_json::to_vec(object)?)
    }

    fn decode_list(&self, data: &[u8]) -> Result<Self::List, CodecError> {
        Ok(serde_json::from_slice(data)?)
    }
}

/// JSON codec for a concrete resource type.
pub struct TypedCodec<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> TypedCodec<T> {
    /// Creates a codec for `T`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for TypedCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for TypedCodec<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypedCodec<T> {}

impl<T> fmt::Debug for TypedCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedCodec")
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T> Codec for TypedCodec<T>
where
    T: Serialize + DeserializeOwned + Send,
{
    type Object = T;
    type List = ObjectList<T>;

    fn decode(&self, data: &[u8]) -> Result<Self::Object, CodecError> {
        Ok(serde_json::from_slice(data)?)
    }

    fn encode(&self, object: &Self::Object) -> Result<Vec<u8>, CodecError> {
        Ok(serde_json::to_vec(object)?)
    }

    fn decode_list(&self, data: &[u8]) -> Result<Self::List, CodecError> {
        Ok(serde_json::from_slice(data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::meta::ObjectMeta;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct ConfigMap {
        metadata: ObjectMeta,
        #[serde(default)]
        data: std::collections::BTreeMap<String, String>,
    }

    #[test]
    fn test_json_codec_preserves_key_order() {
        let input = br#"{"spec":{"replicas":3},"kind":"Deployment","apiVersion":"apps/v1"}"#;
        let object = JsonCodec.decode(input).unwrap();
        assert_eq!(JsonCodec.encode(&object).unwrap(), input.to_vec());
    }

    #[test]
    fn test_json_codec_rejects_malformed_input() {
        let result = JsonCodec.decode(b"{not json");
        assert!(matches!(result, Err(CodecError::Json(_))));
    }

    #[test]
    fn test_typed_codec_decodes_object_and_list() {
        let codec = TypedCodec::<ConfigMap>::new();

        let object = codec
            .decode(
                br#"{"metadata":{"name":"settings","resourceVersion":"3"},"data":{"mode":"fast"}}"#,
            )
            .unwrap();
        assert_eq!(object.metadata.name.as_deref(), Some("settings"));
        assert_eq!(object.data.get("mode").map(String::as_str), Some("fast"));

        let list = codec
            .decode_list(
                br#"{"kind":"ConfigMapList","metadata":{"resourceVersion":"9"},"items":[{"metadata":{"name":"a"}},{"metadata":{"name":"b"}}]}"#,
            )
            .unwrap();
        assert_eq!(list.items.len(), 2);
        assert_eq!(list.metadata.resource_version.as_deref(), Some("9"));
    }

    #[test]
    fn test_typed_codec_rejects_wrong_shape() {
        let codec = TypedCodec::<ConfigMap>::new();
        assert!(codec.decode(br#"{"metadata":"nope"}"#).is_err());
    }

    #[test]
    fn test_default_content_type_is_json() {
        assert_eq!(JsonCodec.content_type(), ContentType::Json);
        assert_eq!(
            TypedCodec::<ConfigMap>::new().content_type(),
            ContentType::Json
        );
    }
}
