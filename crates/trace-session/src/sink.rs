// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Persistence collaborators for the streaming session.
//!
//! A [`BufferSink`] receives every retired buffer and owns it until the
//! contents are persisted. Dropping (or recycling) the [`RetiredBuffer`]
//! hands the storage back to the session's pool, so a slow sink exerts
//! backpressure through the pool's overflow policy.

use crate::SessionError;
use tokio::sync::mpsc;
use trace_buffer::RetiredBuffer;

/// Destination for retired buffers.
pub trait BufferSink: Send + Sync {
    /// Takes ownership of a retired buffer.
    ///
    /// Must not block for long; it runs on the producer's thread.
    fn accept(&self, buffer: RetiredBuffer) -> Result<(), SessionError>;

    /// Pushes anything the sink has buffered towards its destination.
    fn flush(&self) -> Result<(), SessionError> {
        Ok(())
    }
}

/// Forwards retired buffers over an unbounded tokio channel to an
/// asynchronous writer task.
///
/// # Example
/// ```
/// use trace_session::ChannelSink;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let (sink, mut rx) = ChannelSink::new();
/// tokio::spawn(async move {
///     while let Some(buffer) = rx.recv().await {
///         // persist buffer.data() ...
///         buffer.recycle();
///     }
/// });
/// # drop(sink);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<RetiredBuffer>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<RetiredBuffer>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl BufferSink for ChannelSink {
    fn accept(&self, buffer: RetiredBuffer) -> Result<(), SessionError> {
        let sequence = buffer.sequence();
        // On failure the buffer comes back inside the error and is
        // recycled when the error is dropped.
        self.tx.send(buffer).map_err(|_| {
            SessionError::Sink(format!(
                "writer task has gone away; buffer #{sequence} lost"
            ))
        })
    }
}
