// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The null session: tracing enabled, nothing recorded.
//!
//! Every instrumentation call still runs, but the session never hands out
//! a buffer, so producers skip recording. Comparing a run against this
//! session with a run against an active one isolates the cost of the
//! framework itself.
//!
//! `next_buffer` and `retire_buffer` are empty inherent methods marked
//! `#[inline(always)]`. Called through [`NullSession`] or
//! [`AnySession`](crate::AnySession) they compile away entirely; they
//! take no lock, allocate nothing and read no shared state.

use super::lifecycle::Lifecycle;
use super::{Session, SessionKind, SessionState};
use crate::{SessionError, SessionId, SessionOptions, TraceManager};
use std::sync::Arc;
use trace_buffer::{Buffer, ShutdownReport};

/// A session that records nothing.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use trace_session::{LoggingTraceManager, NullSession, SessionOptions};
///
/// let session = NullSession::new(
///     Arc::new(LoggingTraceManager::new()),
///     Arc::new(SessionOptions::default()),
/// );
/// assert!(session.next_buffer().is_none());
/// session.retire_buffer(None);
/// ```
#[derive(Debug)]
pub struct NullSession {
    options: Arc<SessionOptions>,
    lifecycle: Lifecycle,
}

impl NullSession {
    /// Creates a null session. The manager is only asked for an id.
    pub fn new(manager: Arc<dyn TraceManager>, options: Arc<SessionOptions>) -> Self {
        let id = manager.allocate_session_id();
        tracing::debug!(session = %id, "null session created");
        Self {
            options,
            lifecycle: Lifecycle::new(id),
        }
    }

    /// Always `None`.
    #[inline(always)]
    pub fn next_buffer(&self) -> Option<Buffer> {
        None
    }

    /// Does nothing with its argument, valid or not.
    ///
    /// The buffer is still consumed: a pooled buffer retired here is
    /// dropped, which hands it back to its own pool as abandoned.
    #[inline(always)]
    pub fn retire_buffer(&self, _buffer: Option<Buffer>) {}

    /// The options this session was built with. They are never consulted.
    pub fn options(&self) -> &SessionOptions {
        &self.options
    }
}

impl Session for NullSession {
    fn id(&self) -> SessionId {
        self.lifecycle.id()
    }

    fn kind(&self) -> SessionKind {
        SessionKind::Null
    }

    fn buffer_capacity(&self) -> usize {
        0
    }

    fn state(&self) -> SessionState {
        self.lifecycle.get()
    }

    #[inline(always)]
    fn next_buffer(&self) -> Option<Buffer> {
        NullSession::next_buffer(self)
    }

    #[inline(always)]
    fn retire_buffer(&self, buffer: Option<Buffer>) {
        NullSession::retire_buffer(self, buffer)
    }

    fn start(&self) -> Result<(), SessionError> {
        self.lifecycle.start()
    }

    fn stop(&self) -> Result<(), SessionError> {
        self.lifecycle.stop()
    }

    fn flush(&self) -> Result<(), SessionError> {
        self.lifecycle.ensure_live("flush")
    }

    fn teardown(&self) -> ShutdownReport {
        self.lifecycle.tear_down();
        ShutdownReport::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Diagnostic, LoggingTraceManager};
    use std::sync::atomic::{AtomicU64, Ordering};
    use trace_buffer::{BufferCapacity, BufferPool, PoolConfig};

    #[derive(Default)]
    struct CountingManager {
        reports: AtomicU64,
    }

    impl TraceManager for CountingManager {
        fn allocate_session_id(&self) -> SessionId {
            SessionId::new(42)
        }

        fn report(&self, _session: SessionId, _diagnostic: Diagnostic) {
            self.reports.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn null() -> NullSession {
        NullSession::new(
            Arc::new(LoggingTraceManager::new()),
            Arc::new(SessionOptions::default()),
        )
    }

    #[test]
    fn test_never_issues_buffers() {
        let s = null();
        assert!(s.next_buffer().is_none());
        s.start().unwrap();
        for _ in 0..10_000 {
            assert!(s.next_buffer().is_none());
            s.retire_buffer(None);
        }
        assert_eq!(s.buffer_capacity(), 0);
        assert_eq!(s.kind(), SessionKind::Null);
    }

    #[test]
    fn test_retire_accepts_anything_silently() {
        let manager = Arc::new(CountingManager::default());
        let s = NullSession::new(manager.clone(), Arc::new(SessionOptions::default()));

        s.retire_buffer(Some(Buffer::detached(16)));
        let pool = BufferPool::new(PoolConfig {
            buffer_capacity: BufferCapacity::from_bytes(8),
            max_buffers: 1,
            ..Default::default()
        })
        .unwrap();
        s.retire_buffer(Some(pool.acquire().unwrap()));
        // The dropped buffer went home as abandoned.
        assert_eq!(pool.stats().abandoned, 1);
        assert_eq!(pool.outstanding(), 0);
        assert_eq!(pool.free_count(), 1);

        assert_eq!(manager.reports.load(Ordering::Relaxed), 0);
        assert_eq!(s.state(), SessionState::Created);
        assert_eq!(s.id(), SessionId::new(42));
    }

    #[test]
    fn test_lifecycle() {
        let s = null();
        s.start().unwrap();
        assert_eq!(s.state(), SessionState::Recording);
        s.stop().unwrap();
        s.flush().unwrap();
        assert_eq!(s.teardown(), ShutdownReport::default());
        assert_eq!(s.state(), SessionState::TornDown);
        assert!(s.flush().is_err());
    }
}
