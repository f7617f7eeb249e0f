//! HTTP client types for resource API communication.
//!
//! This module provides the transport layer resource helpers are built on.
//! It handles request construction and validation, response and server
//! status processing, and watch streaming.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: The async HTTP client for API communication
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A parsed response from the API
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, PATCH, DELETE)
//! - [`ContentType`] and [`PatchType`]: Content types for request bodies
//! - [`Status`]: The server's failure description object
//! - [`RestClient`]: The transport trait resource helpers send through
//! - [`EventStream`]: The receiving half of a watch
//!
//! # Example
//!
//! ```rust,ignore
//! use resource_helper::{ClientConfig, HostUrl};
//! use resource_helper::clients::{HttpClient, HttpMethod, HttpRequest, RestClient};
//!
//! let config = ClientConfig::builder()
//!     .host(HostUrl::new("https://kube.example.com:6443")?)
//!     .build()?;
//! let client = HttpClient::new(&config)?;
//!
//! let request = HttpRequest::builder(HttpMethod::Get)
//!     .namespace("default")
//!     .resource("configmaps")
//!     .name("app-settings")
//!     .build()?;
//!
//! let body = client.send(request).await?;
//! ```
//!
//! # Failure Behavior
//!
//! Every request is attempted once. Non-2xx responses become
//! [`HttpError::Response`], carrying the `message` and `reason` of the
//! server [`Status`] when the body holds one.

mod errors;
mod http_client;
mod http_request;
mod http_response;
pub mod rest;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{HttpClient, LIBRARY_VERSION};
pub use http_request::{ContentType, HttpMethod, HttpRequest, HttpRequestBuilder, PatchType};
pub use http_response::{HttpResponse, Status};

// Re-export transport types at the clients module level
pub use rest::{EventStream, EventType, FrameBuffer, MAX_FRAME_SIZE, RawEvent, RestClient};
