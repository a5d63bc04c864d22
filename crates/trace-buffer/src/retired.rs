// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! RAII handle for a retired buffer awaiting reclamation.
//!
//! [`RetiredBuffer`] is what a persistence collaborator receives when a
//! streaming session retires a full buffer. The buffer stays counted
//! against the pool limit until the handle is recycled or dropped, at
//! which point its storage goes back on the pool's free stack.

use crate::pool::PoolShared;
use crate::BufferState;
use std::sync::Arc;

/// A retired buffer, pending reclamation by its pool.
///
/// # Example
/// ```ignore
/// let retired = pool.retire(buffer)?;
/// sink.write_all(retired.data())?;   // persist the contents
/// retired.recycle();                 // storage returns to the pool
/// ```
pub struct RetiredBuffer {
    sequence: u64,
    /// Wrapped in `Option` so `drop()` can take it.
    storage: Option<Vec<u8>>,
    len: usize,
    pool: Arc<PoolShared>,
}

impl RetiredBuffer {
    pub(crate) fn new(sequence: u64, storage: Vec<u8>, len: usize, pool: Arc<PoolShared>) -> Self {
        Self {
            sequence,
            storage: Some(storage),
            len,
            pool,
        }
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Identifier of the pool this buffer will be recycled into.
    pub fn origin(&self) -> u64 {
        self.pool.id()
    }

    pub fn state(&self) -> BufferState {
        BufferState::Retired
    }

    /// The bytes the producer wrote before retiring.
    pub fn data(&self) -> &[u8] {
        match &self.storage {
            Some(storage) => &storage[..self.len],
            None => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Signals that the contents are no longer needed.
    pub fn recycle(self) {
        drop(self);
    }
}

impl Drop for RetiredBuffer {
    fn drop(&mut self) {
        if let Some(storage) = self.storage.take() {
            self.pool.complete(self.sequence, storage);
        }
    }
}

impl std::fmt::Debug for RetiredBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetiredBuffer")
            .field("sequence", &self.sequence)
            .field("len", &self.len)
            .finish()
    }
}
