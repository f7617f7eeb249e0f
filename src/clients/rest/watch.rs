//! Raw watch event streams.
//!
//! A watch response is a long-lived body of newline-delimited JSON frames of
//! the form `{"type":"ADDED","object":{...}}`. [`FrameBuffer`] splits the
//! chunked body into frames, [`RawEvent::parse`] decodes one frame, and
//! [`EventStream`] hands the events to the consumer.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::clients::HttpError;

/// The kind of change a watch event reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventType {
    /// An object was created.
    Added,
    /// An object was changed.
    Modified,
    /// An object was removed.
    Deleted,
    /// The server reported a failure; the object is a `Status`.
    Error,
}

/// A watch event whose object is still encoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawEvent {
    /// The kind of change.
    pub event_type: EventType,
    /// The encoded object the event refers to.
    pub object: Vec<u8>,
}

impl RawEvent {
    /// Decodes a single watch frame.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::MalformedEvent`] if the frame is not a JSON object
    /// with `type` and `object` fields.
    pub fn parse(frame: &[u8]) -> Result<Self, HttpError> {
        #[derive(Deserialize)]
        struct Frame {
            #[serde(rename = "type")]
            event_type: EventType,
            object: serde_json::Value,
        }

        let frame: Frame = serde_json::from_slice(frame).map_err(HttpError::MalformedEvent)?;
        let object = serde_json::to_vec(&frame.object).map_err(HttpError::MalformedEvent)?;
        Ok(Self {
            event_type: frame.event_type,
            object,
        })
    }
}

/// Largest watch frame accepted by default (16 MiB).
pub const MAX_FRAME_SIZE: usize = 16 * 1024 * 1024;

/// Accumulates body chunks and yields complete newline-terminated frames.
///
/// The unterminated tail is bounded by a frame limit, so a peer that never
/// sends a newline cannot grow the buffer without end.
#[derive(Debug)]
pub struct FrameBuffer {
    buffer: Vec<u8>,
    limit: usize,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::with_limit(MAX_FRAME_SIZE)
    }
}

impl FrameBuffer {
    /// Creates a buffer that rejects frames longer than `limit` bytes.
    #[must_use]
    pub const fn with_limit(limit: usize) -> Self {
        Self {
            buffer: Vec::new(),
            limit,
        }
    }

    /// Appends a chunk of the response body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::FrameTooLarge`] if the bytes after the last
    /// newline exceed the frame limit. The buffer is cleared in that case.
    pub fn push_chunk(&mut self, chunk: &[u8]) -> Result<(), HttpError> {
        self.buffer.extend_from_slice(chunk);

        let tail = self
            .buffer
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(self.buffer.len(), |newline| self.buffer.len() - newline - 1);
        if tail > self.limit {
            self.buffer.clear();
            return Err(HttpError::FrameTooLarge { limit: self.limit });
        }
        Ok(())
    }

    /// Removes and returns the next complete, non-blank frame.
    pub fn next_frame(&mut self) -> Option<Vec<u8>> {
        loop {
            let boundary = self.buffer.iter().position(|&b| b == b'\n')?;
            let remaining = self.buffer.split_off(boundary + 1);
            let mut frame = std::mem::replace(&mut self.buffer, remaining);
            frame.truncate(boundary);
            if frame.last() == Some(&b'\r') {
                frame.pop();
            }
            if !frame.iter().all(u8::is_ascii_whitespace) {
                return Some(frame);
            }
        }
    }

    /// Returns whatever is left once the body has ended, if not blank.
    pub fn finish(&mut self) -> Option<Vec<u8>> {
        let rest = std::mem::take(&mut self.buffer);
        (!rest.iter().all(u8::is_ascii_whitespace)).then_some(rest)
    }
}

/// Receiving half of a watch.
///
/// Dropping the stream, or calling [`close`](Self::close), tells the producer
/// to stop reading from the server.
#[derive(Debug)]
pub struct EventStream {
    receiver: mpsc::Receiver<Result<RawEvent, HttpError>>,
}

impl EventStream {
    /// Wraps the receiving end of an event channel.
    #[must_use]
    pub const fn new(receiver: mpsc::Receiver<Result<RawEvent, HttpError>>) -> Self {
        Self { receiver }
    }

    /// Creates a connected sender and stream with the given buffer capacity.
    #[must_use]
    pub fn channel(capacity: usize) -> (mpsc::Sender<Result<RawEvent, HttpError>>, Self) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (sender, Self::new(receiver))
    }

    /// Waits for the next event. Returns `None` once the watch has ended.
    pub async fn recv(&mut self) -> Option<Result<RawEvent, HttpError>> {
        self.receiver.recv().await
    }

    /// Stops the watch. Events already buffered can still be received.
    pub fn close(&mut self) {
        self.receiver.close();
    }
}
