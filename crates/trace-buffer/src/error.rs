// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for trace buffers and the buffer pool.

/// Errors produced by [`Buffer`](crate::Buffer) writes and
/// [`BufferPool`](crate::BufferPool) operations.
///
/// Exhaustion variants (`Exhausted`, `TimedOut`, `Closed`) are expected
/// under load and are turned into "no buffer" by sessions. The misuse
/// variants (`ForeignBuffer`, `AlreadyRetired`) indicate a programmer error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    /// A write would run past the end of the buffer.
    #[error("buffer full: requested {requested} bytes, {remaining} remaining")]
    Full { requested: usize, remaining: usize },

    /// The pool is at its buffer limit and the overflow policy drops.
    #[error("buffer pool exhausted: {max_buffers} buffers outstanding")]
    Exhausted { max_buffers: usize },

    /// The pool stayed at its limit for the whole blocking window.
    #[error("timed out after {waited_ms}ms waiting for a free buffer")]
    TimedOut { waited_ms: u64 },

    /// The pool has been shut down and issues no more buffers.
    #[error("buffer pool is closed")]
    Closed,

    /// Storage for a fresh buffer could not be reserved.
    #[error("failed to allocate {bytes} bytes of buffer storage")]
    AllocationFailed { bytes: usize },

    /// The buffer was not issued by this pool.
    #[error("buffer #{sequence} belongs to pool {origin:?}, not pool {pool}")]
    ForeignBuffer {
        sequence: u64,
        origin: Option<u64>,
        pool: u64,
    },

    /// The buffer is not outstanding in this pool (retired twice).
    #[error("buffer #{sequence} was already retired")]
    AlreadyRetired { sequence: u64 },

    /// A capacity or pool limit was zero or unparsable.
    #[error("invalid buffer configuration: {0}")]
    InvalidConfig(String),
}

impl BufferError {
    /// Returns `true` for errors caused by calling code breaking the
    /// acquire/retire protocol.
    pub fn is_misuse(&self) -> bool {
        matches!(
            self,
            BufferError::ForeignBuffer { .. } | BufferError::AlreadyRetired { .. }
        )
    }

    /// Returns `true` when the pool simply had nothing to hand out.
    pub fn is_exhaustion(&self) -> bool {
        matches!(
            self,
            BufferError::Exhausted { .. } | BufferError::TimedOut { .. } | BufferError::Closed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(BufferError::AlreadyRetired { sequence: 3 }.is_misuse());
        assert!(BufferError::Closed.is_exhaustion());
        assert!(!BufferError::AllocationFailed { bytes: 1 }.is_misuse());
        assert!(!BufferError::AllocationFailed { bytes: 1 }.is_exhaustion());
    }

    #[test]
    fn test_display() {
        let e = BufferError::Full {
            requested: 10,
            remaining: 4,
        };
        assert_eq!(e.to_string(), "buffer full: requested 10 bytes, 4 remaining");
    }
}
