//! The resource helper: typed operations with version reconciliation.
//!
//! [`Helper`] addresses one resource type through a [`RestClient`]. Reads
//! and deletes are plain passthroughs. [`Helper::create`] and
//! [`Helper::replace`] inspect the caller's payload first and may rewrite its
//! version token before sending it:
//!
//! - `create(modify = true)` clears a non-empty token, since the server
//!   rejects creates that carry one.
//! - `replace(overwrite = true)` on a payload without a token fetches the
//!   server's copy and adopts its token, turning the replace into a blind
//!   overwrite.
//!
//! Reconciliation is best effort. A payload that cannot be decoded, or whose
//! token cannot be read, is sent exactly as given and the server decides.
//! Once the helper has started changing an object, every failure is
//! returned to the caller.

use std::borrow::Cow;

use crate::clients::{HttpMethod, HttpRequest, HttpRequestBuilder, PatchType, RestClient};
use crate::resource::codec::Codec;
use crate::resource::errors::HelperError;
use crate::resource::mapping::{RestMapping, RestScope};
use crate::resource::selector::{FieldSelector, LabelSelector};
use crate::resource::versioner::ResourceVersioner;
use crate::resource::watch::Watcher;

/// Path prefix for watch requests.
const WATCH_PREFIX: &str = "watch";

/// Retrieves and mutates objects of a single resource type.
///
/// The helper holds only configuration fixed at construction. It keeps no
/// state between calls, so one instance can serve concurrent callers.
///
/// # Example
///
/// ```rust,ignore
/// use resource_helper::clients::HttpClient;
/// use resource_helper::resource::{Helper, JsonCodec, JsonMetadataAccessor, RestScope};
///
/// let helper = Helper::new(
///     client,
///     "configmaps",
///     JsonCodec,
///     JsonMetadataAccessor,
///     RestScope::Namespace,
/// );
///
/// // Send without a resourceVersion and take whatever the server holds.
/// let data = br#"{"metadata":{"name":"settings"},"data":{"mode":"fast"}}"#;
/// let replaced = helper.replace("default", "settings", true, data).await?;
/// ```
#[derive(Debug)]
pub struct Helper<R, C, V> {
    client: R,
    resource: String,
    codec: C,
    versioner: V,
    namespace_scoped: bool,
}

// Verify Helper is Send + Sync when its parts are
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<
        Helper<
            crate::clients::HttpClient,
            crate::resource::JsonCodec,
            crate::resource::JsonMetadataAccessor,
        >,
    >();
};

impl<R, C, V> Helper<R, C, V>
where
    R: RestClient,
    C: Codec,
    V: ResourceVersioner<C::Object>,
{
    /// Creates a helper for the named resource type.
    pub fn new(
        client: R,
        resource: impl Into<String>,
        codec: C,
        versioner: V,
        scope: RestScope,
    ) -> Self {
        Self {
            client,
            resource: resource.into(),
            codec,
            versioner,
            namespace_scoped: scope.is_namespaced(),
        }
    }

    /// Creates a helper from a [`RestMapping`].
    pub fn from_mapping(client: R, mapping: RestMapping<C, V>) -> Self {
        let (resource, scope, codec, versioner) = mapping.into_parts();
        Self::new(client, resource, codec, versioner, scope)
    }

    /// Returns the resource type name.
    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Returns `true` if requests include the namespace segment.
    #[must_use]
    pub const fn is_namespace_scoped(&self) -> bool {
        self.namespace_scoped
    }

    /// Returns the transport.
    #[must_use]
    pub const fn client(&self) -> &R {
        &self.client
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

    /// Fetches a single object.
    ///
    /// # Errors
    ///
    /// Returns [`HelperError::Http`] if the request fails and
    /// [`HelperError::ResponseDecode`] if the response cannot be decoded.
    pub async fn get(&self, namespace: &str, name: &str) -> Result<C::Object, HelperError> {
        let request = self
            .request(HttpMethod::Get, namespace)
            .name(name)
            .build()?;
        self.send_and_decode(request).await
    }

    /// Lists objects matching a label selector.
    ///
    /// `api_version` is recorded for tracing only; requests are routed by the
    /// client's configured group and version.
    ///
    /// # Errors
    ///
    /// Returns [`HelperError::Http`] if the request fails and
    /// [`HelperError::ResponseDecode`] if the response cannot be decoded.
    pub async fn list(
        &self,
        namespace: &str,
        api_version: &str,
        selector: &LabelSelector,
    ) -> Result<C::List, HelperError> {
        tracing::trace!(
            "Listing {} (requested version {})",
            self.resource,
            api_version
        );

        let request = self
            .request(HttpMethod::Get, namespace)
            .param("labelSelector", selector.to_string())
            .build()?;
        let body = self.client.send(request).await?;
        self.codec
            .decode_list(&body)
            .map_err(HelperError::ResponseDecode)
    }

    /// Watches objects matching the selectors, starting after `resource_version`.
    ///
    /// An empty `resource_version` starts from the server's current state.
    ///
    /// # Errors
    ///
    /// Returns [`HelperError::Http`] if the watch cannot be established.
    pub async fn watch(
        &self,
        namespace: &str,
        resource_version: &str,
        api_version: &str,
        labels: &LabelSelector,
        fields: &FieldSelector,
    ) -> Result<Watcher<'_, C>, HelperError> {
        tracing::trace!(
            "Watching {} (requested version {})",
            self.resource,
            api_version
        );

        let request = self
            .request(HttpMethod::Get, namespace)
            .prefix(WATCH_PREFIX)
            .param("resourceVersion", resource_version)
            .param("labelSelector", labels.to_string())
            .param("fieldSelector", fields.to_string())
            .build()?;
        let stream = self.client.watch(request).await?;
        Ok(Watcher::new(&self.codec, stream))
    }

    /// Watches a single named object.
    ///
    /// # Errors
    ///
    /// Returns [`HelperError::Http`] if the watch cannot be established.
    pub async fn watch_single(
        &self,
        namespace: &str,
        name: &str,
        resource_version: &str,
    ) -> Result<Watcher<'_, C>, HelperError> {
        let request = self
            .request(HttpMethod::Get, namespace)
            .prefix(WATCH_PREFIX)
            .name(name)
            .param("resourceVersion", resource_version)
            .build()?;
        let stream = self.client.watch(request).await?;
        Ok(Watcher::new(&self.codec, stream))
    }

    /// Deletes a single object.
    ///
    /// # Errors
    ///
    /// Returns [`HelperError::Http`] if the request fails.
    pub async fn delete(&self, namespace: &str, name: &str) -> Result<(), HelperError> {
        let request = self
            .request(HttpMethod::Delete, namespace)
            .name(name)
            .build()?;
        self.client.send(request).await?;
        Ok(())
    }

    /// Creates an object from an encoded payload.
    ///
    /// With `modify` set, a non-empty version token in the payload is cleared
    /// before sending. A payload that cannot be decoded, or whose token cannot
    /// be read, is sent unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`HelperError::ClearVersion`] or [`HelperError::Encode`] if the
    /// token was found but could not be removed, [`HelperError::Http`] if the
    /// request fails, and [`HelperError::ResponseDecode`] if the response
    /// cannot be decoded.
    pub async fn create(
        &self,
        namespace: &str,
        modify: bool,
        data: &[u8],
    ) -> Result<C::Object, HelperError> {
        let payload = if modify {
            self.prepare_create(data)?
        } else {
            Cow::Borrowed(data)
        };

        let request = self
            .request(HttpMethod::Post, namespace)
            .body(payload.into_owned())
            .body_type(self.codec.content_type())
            .build()?;
        self.send_and_decode(request).await
    }

    /// Applies a patch to a single object.
    ///
    /// # Errors
    ///
    /// Returns [`HelperError::Http`] if the request fails and
    /// [`HelperError::ResponseDecode`] if the response cannot be decoded.
    pub async fn patch(
        &self,
        namespace: &str,
        name: &str,
        patch_type: PatchType,
        data: &[u8],
    ) -> Result<C::Object, HelperError> {
        let request = self
            .request(HttpMethod::Patch, namespace)
            .name(name)
            .body(data)
            .body_type(patch_type.content_type())
            .build()?;
        self.send_and_decode(request).await
    }

    /// Replaces a single object with an encoded payload.
    ///
    /// A payload that carries a version token is sent unchanged, so the server
    /// checks it. A payload without one is sent unchanged unless `overwrite`
    /// is set, in which case the token of the server's current copy is
    /// adopted first. If the server's copy cannot be fetched, the payload is
    /// sent unchanged and the server may create the object.
    ///
    /// # Errors
    ///
    /// Returns [`HelperError::ServerVersion`], [`HelperError::AdoptVersion`]
    /// or [`HelperError::Encode`] if adopting the server's token fails,
    /// [`HelperError::Http`] if the request fails, and
    /// [`HelperError::ResponseDecode`] if the response cannot be decoded.
    pub async fn replace(
        &self,
        namespace: &str,
        name: &str,
        overwrite: bool,
        data: &[u8],
    ) -> Result<C::Object, HelperError> {
        let payload = self
            .prepare_replace(namespace, name, overwrite, data)
            .await?;

        let request = self
            .request(HttpMethod::Put, namespace)
            .name(name)
            .body(payload.into_owned())
            .body_type(self.codec.content_type())
            .build()?;
        self.send_and_decode(request).await
    }

    /// Starts a request addressed to this resource type.
    fn request(&self, method: HttpMethod, namespace: &str) -> HttpRequestBuilder {
        HttpRequest::builder(method)
            .namespace_if_scoped(namespace, self.namespace_scoped)
            .resource(self.resource.as_str())
    }

    async fn send_and_decode(&self, request: HttpRequest) -> Result<C::Object, HelperError> {
        let body = self.client.send(request).await?;
        self.codec
            .decode(&body)
            .map_err(HelperError::ResponseDecode)
    }

    /// Decodes the caller's payload and reads its token.
    ///
    /// Returns `None` when either step fails; the payload is then sent as is.
    fn inspect(&self, data: &[u8]) -> Option<(C::Object, String)> {
        let object = match self.codec.decode(data) {
            Ok(object) => object,
            Err(e) => {
                tracing::debug!(
                    "Cannot decode {} payload, sending it unmodified: {}",
                    self.resource,
                    e
                );
                return None;
            }
        };

        match self.versioner.resource_version(&object) {
            Ok(version) => Some((object, version)),
            Err(e) => {
                tracing::debug!(
                    "Cannot read version of {} payload, sending it unmodified: {}",
                    self.resource,
                    e
                );
                None
            }
        }
    }

    fn prepare_create<'d>(&self, data: &'d [u8]) -> Result<Cow<'d, [u8]>, HelperError> {
        let Some((mut object, version)) = self.inspect(data) else {
            return Ok(Cow::Borrowed(data));
        };
        if version.is_empty() {
            return Ok(Cow::Borrowed(data));
        }

        tracing::debug!("Clearing version {} from new {}", version, self.resource);
        self.versioner
            .set_resource_version(&mut object, "")
            .map_err(HelperError::ClearVersion)?;
        let encoded = self.codec.encode(&object).map_err(HelperError::Encode)?;
        Ok(Cow::Owned(encoded))
    }

    async fn prepare_replace<'d>(
        &self,
        namespace: &str,
        name: &str,
        overwrite: bool,
        data: &'d [u8],
    ) -> Result<Cow<'d, [u8]>, HelperError> {
        let Some((object, version)) = self.inspect(data) else {
            return Ok(Cow::Borrowed(data));
        };
        if !version.is_empty() || !overwrite {
            return Ok(Cow::Borrowed(data));
        }

        let merged = self.overwrite_merge(namespace, name, object).await?;
        Ok(merged.map_or_else(|| Cow::Borrowed(data), Cow::Owned))
    }

    /// Adopts the server's version token onto the caller's object.
    ///
    /// Runs fetch, read server version, set version, encode, in order.
    /// Returns `Ok(None)` when the fetch fails; every later failure is an
    /// error.
    async fn overwrite_merge(
        &self,
        namespace: &str,
        name: &str,
        mut object: C::Object,
    ) -> Result<Option<Vec<u8>>, HelperError> {
        let server_object = match self.get(namespace, name).await {
            Ok(server_object) => server_object,
            Err(e) => {
                tracing::debug!(
                    "Cannot fetch {} {}, replacing without a version: {}",
                    self.resource,
                    name,
                    e
                );
                return Ok(None);
            }
        };

        let server_version = self
            .versioner
            .resource_version(&server_object)
            .map_err(|source| HelperError::ServerVersion {
                name: name.to_string(),
                source,
            })?;

        tracing::debug!(
            "Adopting server version {} for {} {}",
            server_version,
            self.resource,
            name
        );
        self.versioner
            .set_resource_version(&mut object, &server_version)
            .map_err(|source| HelperError::AdoptVersion {
                name: name.to_string(),
                source,
            })?;

        self.codec
            .encode(&object)
            .map(Some)
            .map_err(HelperError::Encode)
    }
}
