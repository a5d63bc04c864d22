// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # trace-buffer
//!
//! Fixed-capacity trace buffers and the bounded pool that recycles them.
//!
//! # Key Components
//!
//! - [`Buffer`]: an append-only region with a single owner at a time.
//! - [`BufferPool`]: hands buffers out, takes them back, and applies an
//!   [`OverflowPolicy`] once `max_buffers` are live.
//! - [`RetiredBuffer`]: a retired buffer held by a persistence
//!   collaborator; recycled when dropped.
//! - [`PoolStats`]: cumulative counters (reuse ratio, drops, timeouts).
//!
//! # Ownership Model
//!
//! ```text
//! BufferPool::acquire()
//!       │
//!       ▼
//!    Buffer  ◄─── InUse, owned by one producer
//!       │
//!       ├── pool.reclaim(buf) ─────────────────────► free stack (LIFO)
//!       │
//!       ├── pool.retire(buf) ──► RetiredBuffer ──drop──► free stack
//!       │
//!       └── drop(buf) (abandoned) ─────────────────► free stack
//! ```
//!
//! Moving a `Buffer` is the hand-off: two producers can never hold the
//! same buffer, and a buffer cannot be retired twice without unsafe code.

mod buffer;
mod capacity;
mod error;
mod pool;
mod retired;
mod stats;

pub use buffer::{Buffer, BufferState};
pub use capacity::BufferCapacity;
pub use error::BufferError;
pub use pool::{BufferPool, OverflowPolicy, PoolConfig, ShutdownReport};
pub use retired::RetiredBuffer;
pub use stats::PoolStats;
