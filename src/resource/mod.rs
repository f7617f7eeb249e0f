//! Resource helpers built on the REST transport.
//!
//! This module provides:
//!
//! - **[`Helper`]**: Get, list, watch, create, patch, replace and delete for a
//!   single resource type, with version token reconciliation on create and
//!   replace
//! - **[`Codec`]**: Payload encoding ([`JsonCodec`], [`TypedCodec`])
//! - **[`ResourceVersioner`]**: Version token access ([`JsonMetadataAccessor`],
//!   [`ObjectMetaAccessor`])
//! - **[`RestMapping`]** and **[`RestScope`]**: How a resource type is addressed
//! - **[`LabelSelector`]** and **[`FieldSelector`]**: List and watch filters
//! - **[`Watcher`]**: Decoded watch events
//! - **[`HelperError`]**: The error type of every helper operation
//!
//! # Example
//!
//! ```rust,ignore
//! use resource_helper::{ClientConfig, HostUrl};
//! use resource_helper::clients::HttpClient;
//! use resource_helper::resource::{Helper, JsonCodec, JsonMetadataAccessor, RestMapping, RestScope};
//!
//! let config = ClientConfig::builder()
//!     .host(HostUrl::new("https://kube.example.com:6443")?)
//!     .build()?;
//! let client = HttpClient::new(&config)?;
//!
//! let mapping = RestMapping::new("configmaps", RestScope::Namespace, JsonCodec, JsonMetadataAccessor)?;
//! let helper = Helper::from_mapping(client, mapping);
//!
//! // Any resourceVersion in the payload is dropped before the create.
//! let created = helper.create("default", true, &payload).await?;
//!
//! // Blind overwrite: the server's current resourceVersion is adopted.
//! let replaced = helper.replace("default", "settings", true, &payload).await?;
//! ```

mod codec;
mod errors;
mod helper;
mod mapping;
mod meta;
mod selector;
mod versioner;
mod watch;

pub use codec::{Codec, CodecError, JsonCodec, TypedCodec};
pub use errors::HelperError;
pub use helper::Helper;
pub use mapping::{RestMapping, RestScope};
pub use meta::{HasMetadata, ListMeta, ObjectList, ObjectMeta};
pub use selector::{FieldSelector, LabelSelector, SelectorError};
pub use versioner::{JsonMetadataAccessor, ObjectMetaAccessor, ResourceVersioner, VersionError};
pub use watch::{WatchEvent, Watcher};
