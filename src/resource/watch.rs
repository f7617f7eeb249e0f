//! Decoded watch events.

use std::collections::HashMap;

use crate::clients::{EventStream, EventType, HttpResponse};
use crate::resource::codec::Codec;
use crate::resource::errors::HelperError;

/// Fallback status code for error events whose status carries none.
const ERROR_EVENT_CODE: u16 = 500;

/// A change to a watched object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WatchEvent<O> {
    /// The kind of change. Never [`EventType::Error`].
    pub event_type: EventType,
    /// The object after the change (for deletions, its last known state).
    pub object: O,
}

/// An open watch whose objects are decoded with the helper's codec.
///
/// # Example
///
/// ```rust,ignore
/// let mut watcher = helper
///     .watch("default", "", "v1", &LabelSelector::everything(), &FieldSelector::everything())
///     .await?;
///
/// while let Some(event) = watcher.next().await {
///     let event = event?;
///     println!("{:?}: {}", event.event_type, event.object["metadata"]["name"]);
/// }
/// ```
#[derive(Debug)]
pub struct Watcher<'a, C> {
    codec: &'a C,
    stream: EventStream,
}

impl<'a, C: Codec> Watcher<'a, C> {
    pub(crate) const fn new(codec: &'a C, stream: EventStream) -> Self {
        Self { codec, stream }
    }

    /// Waits for the next event. Returns `None` once the watch has ended.
    ///
    /// `ERROR` events are returned as [`HelperError::Watch`] with the server
    /// status, and undecodable objects as [`HelperError::ResponseDecode`].
    pub async fn next(&mut self) -> Option<Result<WatchEvent<C::Object>, HelperError>> {
        let raw = match self.stream.recv().await? {
            Ok(raw) => raw,
            Err(e) => return Some(Err(e.into())),
        };

        if raw.event_type == EventType::Error {
            let error = HttpResponse::new(ERROR_EVENT_CODE, HashMap::new(), raw.object)
                .to_error();
            tracing::debug!("Watch delivered an error event: {}", error);
            return Some(Err(HelperError::Watch(error)));
        }

        Some(
            self.codec
                .decode(&raw.object)
                .map(|object| WatchEvent {
                    event_type: raw.event_type,
                    object,
                })
                .map_err(HelperError::ResponseDecode),
        )
    }

    /// Stops the watch. Events already received can still be drained.
    pub fn stop(&mut self) {
        self.stream.close();
    }
}
