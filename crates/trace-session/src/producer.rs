// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Producer-side helper that keeps one buffer per writer.
//!
//! Instrumentation call sites hold a [`Producer`] and call
//! [`Producer::record`] per event. The producer asks the session for a
//! buffer lazily, retires it when it fills, and retires whatever it
//! holds when dropped.

use crate::Session;
use trace_buffer::Buffer;

/// A single writer's view of a session.
///
/// Generic over the session type so that a `Producer<NullSession>`
/// compiles down to the skip branch alone.
pub struct Producer<'a, S: Session + ?Sized> {
    session: &'a S,
    current: Option<Buffer>,
}

impl<'a, S: Session + ?Sized> Producer<'a, S> {
    pub fn new(session: &'a S) -> Self {
        Self {
            session,
            current: None,
        }
    }

    /// Appends one encoded event. Returns `false` if the event was
    /// skipped because no buffer was available or it cannot fit in one.
    #[inline]
    pub fn record(&mut self, event: &[u8]) -> bool {
        if self.current.is_none() {
            self.current = self.session.next_buffer();
        }
        let Some(buffer) = self.current.as_mut() else {
            return false;
        };
        if buffer.write(event).is_ok() {
            return true;
        }

        // Full: swap for a fresh buffer and try once more.
        self.session.retire_buffer(self.current.take());
        self.current = self.session.next_buffer();
        match self.current.as_mut() {
            Some(buffer) => buffer.write(event).is_ok(),
            None => false,
        }
    }

    /// Retires the current buffer, if any.
    pub fn flush(&mut self) {
        if self.current.is_some() {
            self.session.retire_buffer(self.current.take());
        }
    }

    /// Whether a buffer is currently held.
    pub fn has_buffer(&self) -> bool {
        self.current.is_some()
    }
}

impl<S: Session + ?Sized> Drop for Producer<'_, S> {
    fn drop(&mut self) {
        self.flush();
    }
}
