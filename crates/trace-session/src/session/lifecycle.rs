// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Session lifecycle state shared by every variant.
//!
//! ```text
//! Created ──start──► Recording ◄──start── Stopped
//!    │                   │                   ▲
//!    │                   └───────stop────────┘
//!    └──────────────teardown (from any)──────────► TornDown
//! ```

use crate::{SessionError, SessionId};
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum SessionState {
    Created,
    Recording,
    Stopped,
    TornDown,
}

impl SessionState {
    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Created,
            1 => Self::Recording,
            2 => Self::Stopped,
            _ => Self::TornDown,
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Created => "created",
            Self::Recording => "recording",
            Self::Stopped => "stopped",
            Self::TornDown => "torn down",
        })
    }
}

/// Atomic lifecycle cell. Producers read it on every `next_buffer`.
#[derive(Debug)]
pub(crate) struct Lifecycle {
    id: SessionId,
    state: AtomicU8,
}

impl Lifecycle {
    pub(crate) fn new(id: SessionId) -> Self {
        Self {
            id,
            state: AtomicU8::new(SessionState::Created as u8),
        }
    }

    pub(crate) fn id(&self) -> SessionId {
        self.id
    }

    pub(crate) fn get(&self) -> SessionState {
        SessionState::from_u8(self.state.load(Ordering::Acquire))
    }

    #[inline]
    pub(crate) fn is_recording(&self) -> bool {
        self.state.load(Ordering::Acquire) == SessionState::Recording as u8
    }

    fn transition(
        &self,
        allowed: &[SessionState],
        to: SessionState,
        action: &'static str,
    ) -> Result<(), SessionError> {
        let mut current = self.state.load(Ordering::Acquire);
        loop {
            let state = SessionState::from_u8(current);
            if !allowed.contains(&state) {
                return Err(SessionError::InvalidState {
                    id: self.id,
                    state,
                    action,
                });
            }
            match self.state.compare_exchange_weak(
                current,
                to as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return Ok(()),
                Err(actual) => current = actual,
            }
        }
    }

    pub(crate) fn start(&self) -> Result<(), SessionError> {
        self.transition(
            &[SessionState::Created, SessionState::Stopped, SessionState::Recording],
            SessionState::Recording,
            "start",
        )
    }

    pub(crate) fn stop(&self) -> Result<(), SessionError> {
        self.transition(
            &[SessionState::Created, SessionState::Recording, SessionState::Stopped],
            SessionState::Stopped,
            "stop",
        )
    }

    pub(crate) fn ensure_live(&self, action: &'static str) -> Result<(), SessionError> {
        match self.get() {
            SessionState::TornDown => Err(SessionError::InvalidState {
                id: self.id,
                state: SessionState::TornDown,
                action,
            }),
            _ => Ok(()),
        }
    }

    /// Moves to `TornDown`; returns `false` if it already was.
    pub(crate) fn tear_down(&self) -> bool {
        self.state.swap(SessionState::TornDown as u8, Ordering::AcqRel)
            != SessionState::TornDown as u8
    }
}
