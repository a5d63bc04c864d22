// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Fixed-capacity, append-only trace buffers.
//!
//! A [`Buffer`] has exactly one owner at a time. Ownership moves from the
//! pool to a producer on acquire and back again on retirement, so the
//! buffer itself needs no synchronization. A buffer that is dropped while
//! still leased is handed back to its pool as an abandoned buffer.

use crate::pool::PoolShared;
use crate::BufferError;
use std::sync::Arc;

/// Lifecycle state of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum BufferState {
    /// Sitting on the pool's free stack. Free storage is held by the pool,
    /// not as a `Buffer`, so a `Buffer` value never reports this state.
    Free,
    /// Owned by a producer and accepting writes.
    InUse,
    /// No more writes accepted; waiting to be retired.
    Full,
    /// Handed back to the pool, possibly awaiting reclamation.
    Retired,
}

/// A fixed-capacity region that accumulates serialized trace events.
///
/// # Example
/// ```
/// use trace_buffer::{Buffer, BufferError};
///
/// let mut buf = Buffer::detached(8);
/// buf.write(b"abcd").unwrap();
/// assert_eq!(buf.written(), b"abcd");
/// assert!(matches!(buf.write(b"too long"), Err(BufferError::Full { .. })));
/// ```
pub struct Buffer {
    sequence: u64,
    origin: Option<u64>,
    storage: Vec<u8>,
    offset: usize,
    state: BufferState,
    /// Set while the buffer is leased from a pool.
    lease: Option<Arc<PoolShared>>,
}

impl Buffer {
    /// Creates a buffer that belongs to no pool.
    ///
    /// Useful for encoders that want a scratch region. Retiring a detached
    /// buffer into a pool is reported as misuse.
    pub fn detached(capacity: usize) -> Self {
        Self {
            sequence: 0,
            origin: None,
            storage: vec![0u8; capacity],
            offset: 0,
            state: BufferState::InUse,
            lease: None,
        }
    }

    pub(crate) fn leased(sequence: u64, storage: Vec<u8>, pool: Arc<PoolShared>) -> Self {
        Self {
            sequence,
            origin: Some(pool.id()),
            storage,
            offset: 0,
            state: BufferState::InUse,
            lease: Some(pool),
        }
    }

    /// Sequence number, unique and monotonic within the issuing pool.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Identifier of the pool that issued this buffer, if any.
    pub fn origin(&self) -> Option<u64> {
        self.origin
    }

    /// Total capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Current write offset.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes left before the buffer is full.
    pub fn remaining(&self) -> usize {
        self.storage.len() - self.offset
    }

    pub fn state(&self) -> BufferState {
        self.state
    }

    pub fn is_full(&self) -> bool {
        self.state == BufferState::Full
    }

    /// The bytes written so far.
    pub fn written(&self) -> &[u8] {
        &self.storage[..self.offset]
    }

    /// Appends `bytes` and returns the number of bytes written.
    ///
    /// Fails with [`BufferError::Full`] if the write does not fit; the
    /// offset is left unchanged and the owner should retire the buffer.
    pub fn write(&mut self, bytes: &[u8]) -> Result<usize, BufferError> {
        let region = self.reserve(bytes.len())?;
        region.copy_from_slice(bytes);
        Ok(bytes.len())
    }

    /// Advances the write cursor by `len` and returns the reserved region.
    pub fn reserve(&mut self, len: usize) -> Result<&mut [u8], BufferError> {
        if self.state != BufferState::InUse || len > self.remaining() {
            let remaining = if self.state == BufferState::InUse {
                self.remaining()
            } else {
                0
            };
            return Err(BufferError::Full {
                requested: len,
                remaining,
            });
        }

        let start = self.offset;
        self.offset += len;
        if self.offset == self.storage.len() {
            self.state = BufferState::Full;
        }
        Ok(&mut self.storage[start..start + len])
    }

    /// Stops accepting writes. Idempotent.
    pub fn close(&mut self) {
        if self.state == BufferState::InUse {
            self.state = BufferState::Full;
        }
    }

    pub(crate) fn mark_retired(&mut self) {
        self.close();
        self.state = BufferState::Retired;
    }

    /// Ends the lease and yields the storage without triggering the
    /// abandonment path in `Drop`.
    pub(crate) fn into_storage(mut self) -> Vec<u8> {
        self.lease = None;
        std::mem::take(&mut self.storage)
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        if let Some(pool) = self.lease.take() {
            pool.abandon(self.sequence, std::mem::take(&mut self.storage));
        }
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("sequence", &self.sequence)
            .field("origin", &self.origin)
            .field("capacity", &self.capacity())
            .field("offset", &self.offset)
            .field("state", &self.state)
            .finish()
    }
}
