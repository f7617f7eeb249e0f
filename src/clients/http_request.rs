//! HTTP request types for resource operations.
//!
//! This module provides the [`HttpRequest`] type and its builder. A request
//! addresses a resource by optional prefix, optional namespace, resource type,
//! and optional name, relative to the client's API root.

use std::collections::BTreeMap;
use std::fmt;

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods used against the resource API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving, listing, and watching resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for replacing resources.
    Put,
    /// HTTP PATCH method for partially updating resources.
    Patch,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns `true` for methods that must carry a body.
    #[must_use]
    pub const fn requires_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Put => write!(f, "put"),
            Self::Patch => write!(f, "patch"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Content type for HTTP request bodies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentType {
    /// Full JSON object (`application/json`).
    Json,
    /// RFC 6902 JSON patch (`application/json-patch+json`).
    JsonPatch,
    /// RFC 7386 merge patch (`application/merge-patch+json`).
    MergePatch,
    /// Strategic merge patch (`application/strategic-merge-patch+json`).
    StrategicMergePatch,
}

impl ContentType {
    /// Returns the MIME type string for this content type.
    #[must_use]
    pub const fn as_content_type(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::JsonPatch => "application/json-patch+json",
            Self::MergePatch => "application/merge-patch+json",
            Self::StrategicMergePatch => "application/strategic-merge-patch+json",
        }
    }
}

/// The kind of patch carried by a PATCH request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatchType {
    /// A list of JSON patch operations.
    Json,
    /// A JSON merge patch.
    Merge,
    /// A strategic merge patch.
    StrategicMerge,
}

impl PatchType {
    /// Returns the content type the patch body is sent with.
    #[must_use]
    pub const fn content_type(&self) -> ContentType {
        match self {
            Self::Json => ContentType::JsonPatch,
            Self::Merge => ContentType::MergePatch,
            Self::StrategicMerge => ContentType::StrategicMergePatch,
        }
    }
}

/// A request against a resource endpoint.
///
/// Use [`HttpRequest::builder`] to construct requests with the builder pattern.
///
/// # Example
///
/// ```rust
/// use resource_helper::clients::{ContentType, HttpMethod, HttpRequest};
///
/// let request = HttpRequest::builder(HttpMethod::Put)
///     .namespace_if_scoped("default", true)
///     .resource("configmaps")
///     .name("settings")
///     .body(br#"{"kind":"ConfigMap"}"#.to_vec())
///     .body_type(ContentType::Json)
///     .build()
///     .unwrap();
///
/// assert_eq!(request.path(), "namespaces/default/configmaps/settings");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// Path segment placed before the namespace (e.g., "watch").
    pub prefix: Option<String>,
    /// Namespace segment, if the request is namespace scoped.
    pub namespace: Option<String>,
    /// The resource type (e.g., "pods").
    pub resource: String,
    /// The resource name, for requests addressing a single object.
    pub name: Option<String>,
    /// Query parameters to append to the URL.
    pub params: BTreeMap<String, String>,
    /// The encoded request body, if any.
    pub body: Option<Vec<u8>>,
    /// The content type of the body.
    pub body_type: Option<ContentType>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method)
    }

    /// Returns the path relative to the API root.
    ///
    /// Segments are percent-encoded.
    #[must_use]
    pub fn path(&self) -> String {
        let mut segments: Vec<&str> = Vec::with_capacity(5);
        if let Some(prefix) = &self.prefix {
            segments.push(prefix);
        }
        if let Some(namespace) = &self.namespace {
            segments.push("namespaces");
            segments.push(namespace);
        }
        segments.push(&self.resource);
        if let Some(name) = &self.name {
            segments.push(name);
        }

        segments
            .into_iter()
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Validates the request, ensuring it meets all requirements.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if:
    /// - the resource is empty
    /// - a name is set but empty
    /// - any segment contains `/` or is `.` or `..`
    /// - `body` is `Some` but `body_type` is `None`
    /// - `http_method` requires a body but `body` is `None`
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if self.resource.is_empty() {
            return Err(InvalidHttpRequestError::MissingResource);
        }

        if self.name.as_deref() == Some("") {
            return Err(InvalidHttpRequestError::EmptyName);
        }

        let segments = [
            ("prefix", self.prefix.as_deref()),
            ("namespace", self.namespace.as_deref()),
            ("resource", Some(self.resource.as_str())),
            ("name", self.name.as_deref()),
        ];
        for (kind, value) in segments {
            let Some(value) = value else {
                continue;
            };
            if value.contains('/') || value == "." || value == ".." {
                return Err(InvalidHttpRequestError::InvalidSegment {
                    kind,
                    value: value.to_string(),
                });
            }
        }

        if self.body.is_some() && self.body_type.is_none() {
            return Err(InvalidHttpRequestError::MissingBodyType);
        }

        if self.http_method.requires_body() && self.body.is_none() {
            return Err(InvalidHttpRequestError::MissingBody {
                method: self.http_method.to_string(),
            });
        }

        Ok(())
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    prefix: Option<String>,
    namespace: Option<String>,
    resource: String,
    name: Option<String>,
    params: BTreeMap<String, String>,
    body: Option<Vec<u8>>,
    body_type: Option<ContentType>,
}

impl HttpRequestBuilder {
    const fn new(method: HttpMethod) -> Self {
        Self {
            http_method: method,
            prefix: None,
            namespace: None,
            resource: String::new(),
            name: None,
            params: BTreeMap::new(),
            body: None,
            body_type: None,
        }
    }

    /// Sets the path segment placed before the namespace.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Sets the namespace. An empty namespace adds no segment.
    #[must_use]
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        self.namespace = (!namespace.is_empty()).then_some(namespace);
        self
    }

    /// Sets the namespace only when `scoped` is `true`.
    #[must_use]
    pub fn namespace_if_scoped(self, namespace: impl Into<String>, scoped: bool) -> Self {
        if scoped {
            self.namespace(namespace)
        } else {
            self
        }
    }

    /// Sets the resource type.
    #[must_use]
    pub fn resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = resource.into();
        self
    }

    /// Sets the resource name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Adds a query parameter. Empty values are skipped.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.is_empty() {
            self.params.insert(key.into(), value);
        }
        self
    }

    /// Sets the encoded request body.
    ///
    /// When setting a body, you must also set the body type via [`body_type`](Self::body_type).
    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the content type of the request body.
    #[must_use]
    pub const fn body_type(mut self, body_type: ContentType) -> Self {
        self.body_type = Some(body_type);
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            prefix: self.prefix,
            namespace: self.namespace,
            resource: self.resource,
            name: self.name,
            params: self.params,
            body: self.body,
            body_type: self.body_type,
        };
        request.verify()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "get");
        assert_eq!(HttpMethod::Post.to_string(), "post");
        assert_eq!(HttpMethod::Put.to_string(), "put");
        assert_eq!(HttpMethod::Patch.to_string(), "patch");
        assert_eq!(HttpMethod::Delete.to_string(), "delete");
    }

    #[test]
    fn test_patch_type_content_types() {
        assert_eq!(
            PatchType::Json.content_type().as_content_type(),
            "application/json-patch+json"
        );
        assert_eq!(
            PatchType::Merge.content_type().as_content_type(),
            "application/merge-patch+json"
        );
        assert_eq!(
            PatchType::StrategicMerge.content_type().as_content_type(),
            "application/strategic-merge-patch+json"
        );
    }

    #[test]
    fn test_path_for_cluster_scoped_collection() {
        let request = HttpRequest::builder(HttpMethod::Get)
            .resource("nodes")
            .build()
            .unwrap();
        assert_eq!(request.path(), "nodes");
    }

    #[test]
    fn test_path_with_prefix_namespace_and_name() {
        let request = HttpRequest::builder(HttpMethod::Get)
            .prefix("watch")
            .namespace("kube-system")
            .resource("pods")
            .name("dns-1")
            .build()
            .unwrap();
        assert_eq!(request.path(), "watch/namespaces/kube-system/pods/dns-1");
    }

    #[test]
    fn test_namespace_if_scoped_skips_unscoped() {
        let request = HttpRequest::builder(HttpMethod::Get)
            .namespace_if_scoped("default", false)
            .resource("nodes")
            .build()
            .unwrap();
        assert!(request.namespace.is_none());
    }

    #[test]
    fn test_empty_namespace_adds_no_segment() {
        let request = HttpRequest::builder(HttpMethod::Get)
            .namespace_if_scoped("", true)
            .resource("pods")
            .build()
            .unwrap();
        assert_eq!(request.path(), "pods");
    }

    #[test]
    fn test_path_segments_are_percent_encoded() {
        let request = HttpRequest::builder(HttpMethod::Get)
            .resource("secrets")
            .name("db password")
            .build()
            .unwrap();
        assert_eq!(request.path(), "secrets/db%20password");
    }

    #[test]
    fn test_empty_param_values_are_skipped() {
        let request = HttpRequest::builder(HttpMethod::Get)
            .resource("pods")
            .param("resourceVersion", "")
            .param("labelSelector", "app=web")
            .build()
            .unwrap();
        assert_eq!(request.params.len(), 1);
        assert_eq!(
            request.params.get("labelSelector").map(String::as_str),
            Some("app=web")
        );
    }

    #[test]
    fn test_verify_requires_resource() {
        let result = HttpRequest::builder(HttpMethod::Get).build();
        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::MissingResource)
        ));
    }

    #[test]
    fn test_verify_rejects_empty_name() {
        let result = HttpRequest::builder(HttpMethod::Delete)
            .resource("pods")
            .name("")
            .build();
        assert!(matches!(result, Err(InvalidHttpRequestError::EmptyName)));
    }

    #[test]
    fn test_verify_rejects_slash_in_segments() {
        let result = HttpRequest::builder(HttpMethod::Get)
            .namespace("a/b")
            .resource("pods")
            .build();
        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::InvalidSegment {
                kind: "namespace",
                ..
            })
        ));
    }

    #[test]
    fn test_verify_rejects_dot_segments() {
        for name in [".", ".."] {
            let error = HttpRequest::builder(HttpMethod::Delete)
                .namespace("default")
                .resource("pods")
                .name(name)
                .build()
                .unwrap_err();
            assert_eq!(
                error,
                InvalidHttpRequestError::InvalidSegment {
                    kind: "name",
                    value: name.to_string(),
                }
            );
        }

        let result = HttpRequest::builder(HttpMethod::Get)
            .namespace("..")
            .resource("pods")
            .build();
        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::InvalidSegment {
                kind: "namespace",
                ..
            })
        ));
    }

    #[test]
    fn test_verify_allows_dots_inside_segments() {
        let request = HttpRequest::builder(HttpMethod::Get)
            .namespace("default")
            .resource("configmaps")
            .name("..data.v2")
            .build()
            .unwrap();
        assert_eq!(request.path(), "namespaces/default/configmaps/..data.v2");
    }

    #[test]
    fn test_verify_requires_body_for_mutations() {
        for method in [HttpMethod::Post, HttpMethod::Put, HttpMethod::Patch] {
            let result = HttpRequest::builder(method).resource("pods").build();
            assert!(matches!(
                result,
                Err(InvalidHttpRequestError::MissingBody { method: m }) if m == method.to_string()
            ));
        }
    }

    #[test]
    fn test_verify_requires_body_type_when_body_present() {
        let result = HttpRequest::builder(HttpMethod::Post)
            .resource("pods")
            .body(b"{}".to_vec())
            .build();
        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::MissingBodyType)
        ));
    }
}
