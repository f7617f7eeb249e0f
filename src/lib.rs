//! # Resource Helper
//!
//! Typed access to resources on a RESTful API server, with version token
//! reconciliation for create and replace.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ClientConfig`] and [`ClientConfigBuilder`]
//! - Validated newtypes for the server address and API group/version
//! - An async HTTP transport with watch streaming via [`clients::HttpClient`]
//! - A transport trait, [`clients::RestClient`], for plugging in other transports
//! - Resource helpers via [`resource::Helper`], generic over codec and versioner
//!
//! ## Quick Start
//!
//! ```rust
//! use resource_helper::{ClientConfig, GroupVersion, HostUrl};
//!
//! // Create configuration using the builder pattern
//! let config = ClientConfig::builder()
//!     .host(HostUrl::new("https://kube.example.com:6443").unwrap())
//!     .api_version("apps/v1".parse::<GroupVersion>().unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.api_version().api_path(), "/apis/apps/v1");
//! ```
//!
//! ## Creating and Replacing Resources
//!
//! ```rust,ignore
//! use resource_helper::{ClientConfig, HostUrl};
//! use resource_helper::clients::HttpClient;
//! use resource_helper::resource::{Helper, JsonCodec, JsonMetadataAccessor, RestScope};
//!
//! let config = ClientConfig::builder()
//!     .host(HostUrl::new("https://kube.example.com:6443")?)
//!     .build()?;
//! let client = HttpClient::new(&config)?;
//! let helper = Helper::new(client, "configmaps", JsonCodec, JsonMetadataAccessor, RestScope::Namespace);
//!
//! // A copied manifest may carry a stale resourceVersion; modify=true drops it.
//! let created = helper.create("default", true, &manifest).await?;
//!
//! // A payload without a resourceVersion and overwrite=true replaces
//! // whatever the server currently holds.
//! let replaced = helper.replace("default", "settings", true, &manifest).await?;
//! ```
//!
//! ## Watching Resources
//!
//! ```rust,ignore
//! use resource_helper::resource::{FieldSelector, LabelSelector};
//!
//! let labels: LabelSelector = "app=web".parse()?;
//! let mut watcher = helper
//!     .watch("default", "", "v1", &labels, &FieldSelector::everything())
//!     .await?;
//!
//! while let Some(event) = watcher.next().await {
//!     let event = event?;
//!     println!("{:?} {}", event.event_type, event.object["metadata"]["name"]);
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Stateless helpers**: A helper is fixed at construction and keeps nothing between calls

pub mod clients;
pub mod config;
pub mod error;
pub mod resource;

// Re-export public types at crate root for convenience
pub use config::{ClientConfig, ClientConfigBuilder, GroupVersion, HostUrl};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    ContentType, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, InvalidHttpRequestError, PatchType, RestClient, Status,
};

// Re-export resource helper types
pub use resource::{
    Codec, FieldSelector, Helper, HelperError, JsonCodec, JsonMetadataAccessor, LabelSelector,
    ResourceVersioner, RestMapping, RestScope,
};
