// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for tracing sessions.

use crate::{SessionId, SessionState};
use trace_buffer::BufferError;

/// Errors surfaced by session construction and lifecycle calls.
///
/// Buffer exhaustion is never reported through this type: producers see
/// `None` from `next_buffer` instead.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The options could not be read or are inconsistent.
    #[error("configuration error: {0}")]
    Config(String),

    /// The buffer pool rejected its configuration.
    #[error("buffer error: {0}")]
    Buffer(#[from] BufferError),

    /// The persistence collaborator refused or lost a buffer.
    #[error("sink error: {0}")]
    Sink(String),

    /// A lifecycle call arrived in a state that does not allow it.
    #[error("session {id} is {state}; cannot {action}")]
    InvalidState {
        id: SessionId,
        state: SessionState,
        action: &'static str,
    },
}
