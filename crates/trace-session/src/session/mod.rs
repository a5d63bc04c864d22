// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The session contract and its variants.
//!
//! A session hands out buffers to producer threads and takes them back.
//! Three variants implement the contract:
//!
//! | Variant            | `next_buffer`             | `retire_buffer`                  |
//! |--------------------|---------------------------|----------------------------------|
//! | [`NullSession`]    | always `None`             | no-op                            |
//! | [`MemorySession`]  | pooled buffer or `None`   | copy into ring, recycle          |
//! | [`StreamingSession`] | pooled buffer or `None` | hand to sink, recycle when done  |
//!
//! [`AnySession`] wraps them in an enum so the null path is a single
//! inlined match arm rather than a virtual call.

mod active;
mod lifecycle;
pub mod memory;
pub mod null;
pub mod streaming;

pub use lifecycle::SessionState;
pub use memory::MemorySession;
pub use null::NullSession;
pub use streaming::StreamingSession;

use crate::{BufferSink, SessionError, SessionId, SessionOptions, TraceManager};
use std::fmt;
use std::sync::Arc;
use trace_buffer::{Buffer, ShutdownReport};

/// Which session variant to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    Null,
    Memory,
    Streaming,
}

impl SessionKind {
    /// Parses a variant name: `null`, `memory` or `streaming`.
    pub fn parse(s: &str) -> Result<Self, SessionError> {
        match s.trim().to_lowercase().as_str() {
            "null" | "none" => Ok(Self::Null),
            "memory" | "in-memory" => Ok(Self::Memory),
            "streaming" | "stream" => Ok(Self::Streaming),
            other => Err(SessionError::Config(format!(
                "unknown session kind '{other}'; expected 'null', 'memory', or 'streaming'"
            ))),
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Null => "null",
            Self::Memory => "memory",
            Self::Streaming => "streaming",
        })
    }
}

/// The per-recording coordinator of buffer issuance and retirement.
///
/// `next_buffer` and `retire_buffer` may be called concurrently from any
/// number of producer threads. Neither ever fails: exhaustion shows up as
/// `None`, and misuse is reported to the trace manager.
pub trait Session: Send + Sync {
    fn id(&self) -> SessionId;

    fn kind(&self) -> SessionKind;

    /// Byte capacity of the buffers this session issues; zero for null.
    fn buffer_capacity(&self) -> usize;

    fn state(&self) -> SessionState;

    /// Leases a writable buffer, or `None` if recording should be skipped.
    fn next_buffer(&self) -> Option<Buffer>;

    /// Returns a buffer obtained from `next_buffer`. `None` is accepted
    /// so producers can pass back whatever they were given.
    fn retire_buffer(&self, buffer: Option<Buffer>);

    fn start(&self) -> Result<(), SessionError>;

    fn stop(&self) -> Result<(), SessionError>;

    fn flush(&self) -> Result<(), SessionError>;

    /// Final teardown: stops issuing buffers and reclaims what is still
    /// out within the configured grace period.
    fn teardown(&self) -> ShutdownReport;
}

/// A session of any variant, dispatched statically.
#[derive(Debug)]
pub enum AnySession {
    Null(NullSession),
    Memory(MemorySession),
    Streaming(StreamingSession),
}

macro_rules! dispatch {
    ($self:ident, $s:ident => $body:expr) => {
        match $self {
            AnySession::Null($s) => $body,
            AnySession::Memory($s) => $body,
            AnySession::Streaming($s) => $body,
        }
    };
}

impl Session for AnySession {
    fn id(&self) -> SessionId {
        dispatch!(self, s => s.id())
    }

    fn kind(&self) -> SessionKind {
        dispatch!(self, s => s.kind())
    }

    fn buffer_capacity(&self) -> usize {
        dispatch!(self, s => s.buffer_capacity())
    }

    fn state(&self) -> SessionState {
        dispatch!(self, s => Session::state(s))
    }

    #[inline]
    fn next_buffer(&self) -> Option<Buffer> {
        match self {
            AnySession::Null(_) => None,
            AnySession::Memory(s) => s.next_buffer(),
            AnySession::Streaming(s) => s.next_buffer(),
        }
    }

    #[inline]
    fn retire_buffer(&self, buffer: Option<Buffer>) {
        match self {
            AnySession::Null(_) => {}
            AnySession::Memory(s) => s.retire_buffer(buffer),
            AnySession::Streaming(s) => s.retire_buffer(buffer),
        }
    }

    fn start(&self) -> Result<(), SessionError> {
        dispatch!(self, s => s.start())
    }

    fn stop(&self) -> Result<(), SessionError> {
        dispatch!(self, s => s.stop())
    }

    fn flush(&self) -> Result<(), SessionError> {
        dispatch!(self, s => s.flush())
    }

    fn teardown(&self) -> ShutdownReport {
        dispatch!(self, s => s.teardown())
    }
}

/// Builds the session variant named by `options.kind`.
///
/// A streaming session needs a `sink`; the other variants ignore it.
pub fn create_session(
    manager: Arc<dyn TraceManager>,
    options: Arc<SessionOptions>,
    sink: Option<Arc<dyn BufferSink>>,
) -> Result<AnySession, SessionError> {
    match options.kind {
        SessionKind::Null => Ok(AnySession::Null(NullSession::new(manager, options))),
        SessionKind::Memory => Ok(AnySession::Memory(MemorySession::new(manager, options)?)),
        SessionKind::Streaming => {
            let sink = sink.ok_or_else(|| {
                SessionError::Config("a streaming session requires a buffer sink".into())
            })?;
            Ok(AnySession::Streaming(StreamingSession::new(
                manager, options, sink,
            )?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChannelSink, LoggingTraceManager};

    fn options(kind: SessionKind) -> Arc<SessionOptions> {
        Arc::new(SessionOptions {
            kind,
            buffer_capacity: "1K".into(),
            max_buffers: 2,
            ..Default::default()
        })
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!(SessionKind::parse("NULL").unwrap(), SessionKind::Null);
        assert_eq!(SessionKind::parse("memory").unwrap(), SessionKind::Memory);
        assert_eq!(SessionKind::parse("stream").unwrap(), SessionKind::Streaming);
        assert!(SessionKind::parse("disk").is_err());
        assert_eq!(SessionKind::Streaming.to_string(), "streaming");
    }

    #[test]
    fn test_create_each_kind() {
        let manager: Arc<dyn TraceManager> = Arc::new(LoggingTraceManager::new());
        let (sink, _rx) = ChannelSink::new();

        let null = create_session(manager.clone(), options(SessionKind::Null), None).unwrap();
        assert!(matches!(null, AnySession::Null(_)));
        assert_eq!(null.buffer_capacity(), 0);

        let memory = create_session(manager.clone(), options(SessionKind::Memory), None).unwrap();
        assert_eq!(memory.kind(), SessionKind::Memory);
        assert_eq!(memory.buffer_capacity(), 1024);

        let streaming = create_session(
            manager.clone(),
            options(SessionKind::Streaming),
            Some(Arc::new(sink)),
        )
        .unwrap();
        assert_eq!(streaming.kind(), SessionKind::Streaming);

        assert_ne!(null.id(), memory.id());
        assert_ne!(memory.id(), streaming.id());
    }

    #[test]
    fn test_streaming_requires_sink() {
        let manager: Arc<dyn TraceManager> = Arc::new(LoggingTraceManager::new());
        let err = create_session(manager, options(SessionKind::Streaming), None).unwrap_err();
        assert!(matches!(err, SessionError::Config(_)));
    }

    #[test]
    fn test_dispatch_through_enum() {
        let manager: Arc<dyn TraceManager> = Arc::new(LoggingTraceManager::new());
        let s = create_session(manager, options(SessionKind::Memory), None).unwrap();
        assert_eq!(s.state(), SessionState::Created);
        s.start().unwrap();
        let mut b = s.next_buffer().unwrap();
        b.write(b"x").unwrap();
        s.retire_buffer(Some(b));
        s.flush().unwrap();
        let report = s.teardown();
        assert_eq!(report.discarded, 0);
        assert_eq!(s.state(), SessionState::TornDown);
        assert!(s.next_buffer().is_none());
    }

    #[test]
    fn test_sessions_as_trait_objects() {
        let manager: Arc<dyn TraceManager> = Arc::new(LoggingTraceManager::new());
        let sessions: Vec<Box<dyn Session>> = vec![
            Box::new(NullSession::new(manager.clone(), options(SessionKind::Null))),
            Box::new(MemorySession::new(manager, options(SessionKind::Memory)).unwrap()),
        ];
        for s in &sessions {
            s.start().unwrap();
            let b = s.next_buffer();
            assert_eq!(b.is_some(), s.kind() != SessionKind::Null);
            s.retire_buffer(b);
        }
    }
}
