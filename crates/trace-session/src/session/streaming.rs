// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Streaming session: retired buffers flow to a persistence sink.
//!
//! Buffers stay pending in the pool until the sink recycles them, so the
//! pool limit bounds how far the sink may fall behind. `flush` waits, up
//! to the shutdown grace period, for the sink to catch up.

use super::active::ActiveCore;
use super::{Session, SessionKind, SessionState};
use crate::{BufferSink, SessionError, SessionId, SessionOptions, TraceManager};
use std::sync::Arc;
use trace_buffer::{Buffer, PoolStats, ShutdownReport};

/// A session that forwards every retired buffer to a [`BufferSink`].
pub struct StreamingSession {
    core: ActiveCore,
    sink: Arc<dyn BufferSink>,
}

impl StreamingSession {
    pub fn new(
        manager: Arc<dyn TraceManager>,
        options: Arc<SessionOptions>,
        sink: Arc<dyn BufferSink>,
    ) -> Result<Self, SessionError> {
        Ok(Self {
            core: ActiveCore::new(manager, options)?,
            sink,
        })
    }

    pub fn stats(&self) -> PoolStats {
        self.core.stats()
    }

    pub fn options(&self) -> &SessionOptions {
        self.core.options()
    }

    /// Retired buffers the sink has not recycled yet.
    pub fn pending_buffers(&self) -> usize {
        self.core.pool().pending_count()
    }
}

impl Session for StreamingSession {
    fn id(&self) -> SessionId {
        self.core.id()
    }

    fn kind(&self) -> SessionKind {
        SessionKind::Streaming
    }

    fn buffer_capacity(&self) -> usize {
        self.core.buffer_capacity()
    }

    fn state(&self) -> SessionState {
        self.core.state()
    }

    fn next_buffer(&self) -> Option<Buffer> {
        self.core.next_buffer()
    }

    fn retire_buffer(&self, buffer: Option<Buffer>) {
        let Some(buffer) = buffer else {
            return;
        };
        let Some(retired) = self.core.retire(buffer) else {
            return;
        };
        if let Err(e) = self.sink.accept(retired) {
            tracing::warn!(session = %self.core.id(), error = %e, "sink rejected retired buffer");
        }
    }

    fn start(&self) -> Result<(), SessionError> {
        self.core.start()
    }

    fn stop(&self) -> Result<(), SessionError> {
        self.core.stop()
    }

    fn flush(&self) -> Result<(), SessionError> {
        self.core.ensure_live("flush")?;
        self.sink.flush()?;
        let grace = self.core.options().shutdown_grace();
        if !self.core.pool().wait_for_pending(grace) {
            return Err(SessionError::Sink(format!(
                "{} buffers still pending after {}ms",
                self.core.pool().pending_count(),
                grace.as_millis()
            )));
        }
        Ok(())
    }

    fn teardown(&self) -> ShutdownReport {
        self.core.teardown()
    }
}

impl std::fmt::Debug for StreamingSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamingSession")
            .field("id", &self.core.id())
            .field("state", &self.core.state())
            .field("pool", self.core.pool())
            .finish()
    }
}
