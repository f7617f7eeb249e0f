//! The transport seam resource helpers send requests through.
//!
//! # Overview
//!
//! - [`RestClient`]: Sends a built [`HttpRequest`] and returns the raw body,
//!   or opens a watch and returns an [`EventStream`]
//! - [`EventStream`], [`RawEvent`], [`EventType`]: Watch plumbing
//!
//! [`HttpClient`](crate::clients::HttpClient) is the HTTP implementation. Any
//! other transport (an in-process fake, a recording proxy) implements the
//! same trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use resource_helper::clients::{HttpMethod, HttpRequest, RestClient};
//!
//! let request = HttpRequest::builder(HttpMethod::Get)
//!     .namespace("default")
//!     .resource("pods")
//!     .name("web-0")
//!     .build()?;
//!
//! let body = client.send(request).await?;
//! ```

mod watch;

pub use watch::{EventStream, EventType, FrameBuffer, MAX_FRAME_SIZE, RawEvent};

use std::future::Future;
use std::sync::Arc;

use crate::clients::{HttpError, HttpRequest};

/// A transport capable of sending resource requests.
///
/// Implementations must be safe to use from many tasks at once.
pub trait RestClient: Send + Sync {
    /// Sends the request and returns the body of a successful response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for validation, network, and non-2xx failures.
    fn send(&self, request: HttpRequest)
        -> impl Future<Output = Result<Vec<u8>, HttpError>> + Send;

    /// Opens a watch and returns the stream of raw events.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the watch cannot be established.
    fn watch(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<EventStream, HttpError>> + Send;
}

impl<T: RestClient> RestClient for &T {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<Vec<u8>, HttpError>> + Send {
        (**self).send(request)
    }

    fn watch(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<EventStream, HttpError>> + Send {
        (**self).watch(request)
    }
}

impl<T: RestClient> RestClient for Arc<T> {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<Vec<u8>, HttpError>> + Send {
        (**self).send(request)
    }

    fn watch(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<EventStream, HttpError>> + Send {
        (**self).watch(request)
    }
}
