// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! In-memory recording session.
//!
//! Retired buffers are copied into a bounded ring of recorded chunks and
//! recycled straight away, so producers never wait on a consumer. Once the
//! ring is full the oldest chunk is evicted; [`MemorySession::snapshot`]
//! returns whatever is retained at that moment.

use super::active::ActiveCore;
use super::{Session, SessionKind, SessionState};
use crate::{SessionError, SessionId, SessionOptions, TraceManager};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use trace_buffer::{Buffer, PoolStats, ShutdownReport};

struct Recording {
    chunks: VecDeque<Vec<u8>>,
    evicted: u64,
}

/// A session that keeps the most recent buffers' contents in memory.
pub struct MemorySession {
    core: ActiveCore,
    recording: Mutex<Recording>,
    retained: usize,
}

impl MemorySession {
    pub fn new(
        manager: Arc<dyn TraceManager>,
        options: Arc<SessionOptions>,
    ) -> Result<Self, SessionError> {
        let retained = options.retained_chunks();
        Ok(Self {
            core: ActiveCore::new(manager, options)?,
            recording: Mutex::new(Recording {
                chunks: VecDeque::with_capacity(retained),
                evicted: 0,
            }),
            retained,
        })
    }

    /// Copies of the retained chunks, oldest first.
    pub fn snapshot(&self) -> Vec<Vec<u8>> {
        self.recording.lock().chunks.iter().cloned().collect()
    }

    /// Removes and returns the retained chunks, oldest first.
    pub fn drain(&self) -> Vec<Vec<u8>> {
        self.recording.lock().chunks.drain(..).collect()
    }

    /// Total bytes currently retained.
    pub fn recorded_bytes(&self) -> usize {
        self.recording.lock().chunks.iter().map(Vec::len).sum()
    }

    /// Chunks pushed out of the ring to make room.
    pub fn evicted_chunks(&self) -> u64 {
        self.recording.lock().evicted
    }

    pub fn stats(&self) -> PoolStats {
        self.core.stats()
    }

    pub fn options(&self) -> &SessionOptions {
        self.core.options()
    }

    fn record(&self, chunk: Vec<u8>) {
        let mut recording = self.recording.lock();
        if recording.chunks.len() == self.retained {
            recording.chunks.pop_front();
            recording.evicted += 1;
        }
        recording.chunks.push_back(chunk);
    }
}

impl Session for MemorySession {
    fn id(&self) -> SessionId {
        self.core.id()
    }

    fn kind(&self) -> SessionKind {
        SessionKind::Memory
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
        if let Some(retired) = self.core.retire(buffer) {
            // Record before recycling: teardown returns once nothing is pending.
            if !retired.is_empty() {
                self.record(retired.data().to_vec());
            }
            retired.recycle();
        }
    }

    fn start(&self) -> Result<(), SessionError> {
        self.core.start()
    }

    fn stop(&self) -> Result<(), SessionError> {
        self.core.stop()
    }

    fn flush(&self) -> Result<(), SessionError> {
        self.core.ensure_live("flush")
    }

    fn teardown(&self) -> ShutdownReport {
        self.core.teardown()
    }
}

impl std::fmt::Debug for MemorySession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemorySession")
            .field("id", &self.core.id())
            .field("state", &self.core.state())
            .field("pool", self.core.pool())
            .field("retained", &self.retained)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LoggingTraceManager;

    fn session(max_buffers: usize, retained: usize) -> MemorySession {
        let options = SessionOptions {
            buffer_capacity: "16".into(),
            max_buffers,
            retained_chunks: Some(retained),
            ..Default::default()
        };
        MemorySession::new(Arc::new(LoggingTraceManager::new()), Arc::new(options)).unwrap()
    }

    #[test]
    fn test_no_buffers_before_start() {
        let s = session(2, 4);
        assert!(s.next_buffer().is_none());
        s.start().unwrap();
        assert!(s.next_buffer().is_some());
    }

    #[test]
    fn test_retired_contents_are_recorded() {
        let s = session(2, 4);
        s.start().unwrap();
        let mut b = s.next_buffer().unwrap();
        b.write(b"first").unwrap();
        s.retire_buffer(Some(b));

        let mut b = s.next_buffer().unwrap();
        assert_eq!(b.offset(), 0);
        b.write(b"second").unwrap();
        s.retire_buffer(Some(b));

        assert_eq!(s.snapshot(), vec![b"first".to_vec(), b"second".to_vec()]);
        assert_eq!(s.recorded_bytes(), 11);
        assert_eq!(s.stats().recycled, 1);
    }

    #[test]
    fn test_empty_buffers_are_not_recorded() {
        let s = session(1, 4);
        s.start().unwrap();
        let b = s.next_buffer();
        s.retire_buffer(b);
        assert!(s.snapshot().is_empty());
        assert_eq!(s.stats().retirements, 1);
    }

    #[test]
    fn test_ring_evicts_oldest() {
        let s = session(1, 2);
        s.start().unwrap();
        for payload in [b"a", b"b", b"c"] {
            let mut b = s.next_buffer().unwrap();
            b.write(payload).unwrap();
            s.retire_buffer(Some(b));
        }
        assert_eq!(s.snapshot(), vec![b"b".to_vec(), b"c".to_vec()]);
        assert_eq!(s.evicted_chunks(), 1);
        assert_eq!(s.drain().len(), 2);
        assert!(s.snapshot().is_empty());
    }

    #[test]
    fn test_stop_then_retire_outstanding() {
        let s = session(2, 2);
        s.start().unwrap();
        let mut b = s.next_buffer().unwrap();
        b.write(b"late").unwrap();
        s.stop().unwrap();
        assert!(s.next_buffer().is_none());
        s.retire_buffer(Some(b));
        assert_eq!(s.snapshot(), vec![b"late".to_vec()]);
    }
}
