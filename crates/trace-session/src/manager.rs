// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The narrow interface sessions use to talk to their trace manager.
//!
//! The manager owns the registry of recordings and is out of scope here;
//! sessions only need it to obtain an identifier and to report problems
//! that must not disturb the instrumented application. It is passed in
//! explicitly at construction, so several sessions can coexist and each
//! can be tested against its own manager.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use trace_buffer::BufferError;

/// Opaque session identifier, unique for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct SessionId(u64);

impl SessionId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// A problem a session hands to its manager instead of failing.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A producer retired a foreign or already-retired buffer.
    Misuse(BufferError),
    /// The pool could not allocate storage and stopped issuing buffers.
    AllocationFailure { bytes: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Misuse(e) => write!(f, "buffer misuse: {e}"),
            Diagnostic::AllocationFailure { bytes } => {
                write!(f, "allocation of {bytes} bytes failed; tracing disabled")
            }
        }
    }
}

/// What a session needs from the trace manager that constructed it.
pub trait TraceManager: Send + Sync {
    /// Hands out the identifier for a new session.
    fn allocate_session_id(&self) -> SessionId;

    /// Receives a diagnostic from a session. Must not panic.
    fn report(&self, session: SessionId, diagnostic: Diagnostic);
}

/// A trace manager that numbers sessions sequentially and logs
/// diagnostics through `tracing`.
#[derive(Debug, Default)]
pub struct LoggingTraceManager {
    next_id: AtomicU64,
    reported: AtomicU64,
}

impl LoggingTraceManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of diagnostics received so far.
    pub fn diagnostics_reported(&self) -> u64 {
        self.reported.load(Ordering::Relaxed)
    }
}

impl TraceManager for LoggingTraceManager {
    fn allocate_session_id(&self) -> SessionId {
        SessionId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1)
    }

    fn report(&self, session: SessionId, diagnostic: Diagnostic) {
        self.reported.fetch_add(1, Ordering::Relaxed);
        match &diagnostic {
            Diagnostic::AllocationFailure { .. } => {
                tracing::error!(%session, "{diagnostic}");
            }
            Diagnostic::Misuse(_) => tracing::warn!(%session, "{diagnostic}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sequential() {
        let m = LoggingTraceManager::new();
        assert_eq!(m.allocate_session_id(), SessionId::new(1));
        assert_eq!(m.allocate_session_id().as_u64(), 2);
    }

    #[test]
    fn test_report_counts() {
        let m = LoggingTraceManager::new();
        let id = m.allocate_session_id();
        m.report(id, Diagnostic::Misuse(BufferError::Closed));
        m.report(id, Diagnostic::AllocationFailure { bytes: 64 });
        assert_eq!(m.diagnostics_reported(), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(SessionId::new(7).to_string(), "session-7");
        let d = Diagnostic::Misuse(BufferError::AlreadyRetired { sequence: 4 });
        assert_eq!(d.to_string(), "buffer misuse: buffer #4 was already retired");
    }
}
