// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Bounded, recycling pool of trace buffers.
//!
//! The [`BufferPool`] partitions its buffers into three sets:
//!
//! 1. **Free**: a LIFO stack of reset buffers ready to hand out. The most
//!    recently retired buffer is reused first, since its storage is the
//!    most likely to still be warm in cache.
//! 2. **Outstanding**: buffers leased to producers.
//! 3. **Pending**: retired buffers held by a persistence collaborator
//!    (see [`RetiredBuffer`]) that have not been recycled yet.
//!
//! Unless the policy is [`OverflowPolicy::Unbounded`], the three sets
//! together never exceed `max_buffers`. When the limit is reached the
//! overflow policy decides whether `acquire` waits or gives up.
//!
//! # Thread Safety
//! All bookkeeping lives behind a single `parking_lot::Mutex`; blocked
//! acquirers park on a `Condvar` that is signalled on every recycle.

use crate::{Buffer, BufferCapacity, BufferError, PoolStats, RetiredBuffer};
use parking_lot::{Condvar, Mutex};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

static NEXT_POOL_ID: AtomicU64 = AtomicU64::new(1);

/// What `acquire` does when the pool is at its buffer limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverflowPolicy {
    /// Wait up to the configured timeout for a buffer to be recycled.
    #[default]
    Block,
    /// Give up immediately.
    DropNewest,
    /// Ignore the limit and allocate another buffer.
    Unbounded,
}

impl OverflowPolicy {
    /// Parses a policy name: `block`, `drop-newest` or `unbounded`.
    pub fn parse(s: &str) -> Result<Self, BufferError> {
        match s.trim().to_lowercase().as_str() {
            "block" => Ok(Self::Block),
            "drop-newest" | "drop_newest" | "drop" => Ok(Self::DropNewest),
            "unbounded" | "allocate-unbounded" => Ok(Self::Unbounded),
            other => Err(BufferError::InvalidConfig(format!(
                "unknown overflow policy '{other}'; expected 'block', 'drop-newest', or 'unbounded'"
            ))),
        }
    }
}

impl std::fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Block => "block",
            Self::DropNewest => "drop-newest",
            Self::Unbounded => "unbounded",
        })
    }
}

/// Pool sizing and overflow behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Size of every buffer.
    pub buffer_capacity: BufferCapacity,
    /// Maximum live buffers (free + outstanding + pending).
    pub max_buffers: usize,
    pub overflow_policy: OverflowPolicy,
    /// How long `Block` waits before giving up.
    pub block_timeout: Duration,
}

impl PoolConfig {
    /// Checks that the capacity and limit are usable.
    pub fn validate(&self) -> Result<(), BufferError> {
        if self.buffer_capacity.as_bytes() == 0 {
            return Err(BufferError::InvalidConfig(
                "buffer capacity must be non-zero".into(),
            ));
        }
        if self.max_buffers == 0 {
            return Err(BufferError::InvalidConfig(
                "max_buffers must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: BufferCapacity::DEFAULT,
            max_buffers: 16,
            overflow_policy: OverflowPolicy::Block,
            block_timeout: Duration::from_millis(10),
        }
    }
}

/// Outcome of [`BufferPool::shutdown`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct ShutdownReport {
    /// Buffers still leased or pending when the pool was closed.
    pub outstanding_at_close: usize,
    /// Buffers that missed the grace period and were forcibly reclaimed.
    pub discarded: usize,
}

struct FreeSlot {
    sequence: u64,
    storage: Vec<u8>,
}

struct PoolState {
    free: Vec<FreeSlot>,
    outstanding: HashSet<u64>,
    pending: HashSet<u64>,
    next_sequence: u64,
    closed: bool,
    /// Set after an allocation failure; every later acquire fails.
    degraded: bool,
    stats: PoolStats,
}

impl PoolState {
    fn live(&self) -> usize {
        self.free.len() + self.outstanding.len() + self.pending.len()
    }

    fn drained(&self) -> bool {
        self.outstanding.is_empty() && self.pending.is_empty()
    }
}

/// Pool state shared with leased and retired buffers.
pub(crate) struct PoolShared {
    id: u64,
    config: PoolConfig,
    state: Mutex<PoolState>,
    /// Signalled when a buffer lands on the free stack or the pool closes.
    available: Condvar,
    /// Signalled whenever the pending set empties.
    drained: Condvar,
}

impl PoolShared {
    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    /// Returns storage to the free stack, or drops it once the pool is closed.
    fn push_free(&self, state: &mut PoolState, sequence: u64, storage: Vec<u8>) {
        if !state.closed {
            state.free.push(FreeSlot { sequence, storage });
            self.available.notify_one();
        }
        if state.pending.is_empty() {
            self.drained.notify_all();
        }
    }

    /// Called when a leased [`Buffer`] is dropped without being retired.
    pub(crate) fn abandon(&self, sequence: u64, storage: Vec<u8>) {
        let mut state = self.state.lock();
        if state.outstanding.remove(&sequence) {
            state.stats.abandoned += 1;
            tracing::debug!(pool = self.id, sequence, "abandoned buffer returned to pool");
            self.push_free(&mut state, sequence, storage);
        }
    }

    /// Called when a [`RetiredBuffer`] is recycled.
    pub(crate) fn complete(&self, sequence: u64, storage: Vec<u8>) {
        let mut state = self.state.lock();
        if state.pending.remove(&sequence) {
            self.push_free(&mut state, sequence, storage);
        }
    }
}

/// A bounded pool of fixed-capacity trace buffers.
///
/// # Example
/// ```
/// use trace_buffer::{BufferCapacity, BufferPool, OverflowPolicy, PoolConfig};
///
/// let pool = BufferPool::new(PoolConfig {
///     buffer_capacity: BufferCapacity::from_kb(4),
///     max_buffers: 2,
///     overflow_policy: OverflowPolicy::DropNewest,
///     ..Default::default()
/// })
/// .unwrap();
///
/// let a = pool.acquire().unwrap();
/// let _b = pool.acquire().unwrap();
/// assert!(pool.acquire().is_err());
///
/// pool.reclaim(a).unwrap();
/// assert_eq!(pool.acquire().unwrap().offset(), 0);
/// ```
#[derive(Clone)]
pub struct BufferPool {
    shared: Arc<PoolShared>,
}

impl BufferPool {
    /// Creates an empty pool. Buffers are allocated lazily on demand.
    pub fn new(config: PoolConfig) -> Result<Self, BufferError> {
        config.validate()?;
        Ok(Self {
            shared: Arc::new(PoolShared {
                id: NEXT_POOL_ID.fetch_add(1, Ordering::Relaxed),
                config,
                state: Mutex::new(PoolState {
                    free: Vec::new(),
                    outstanding: HashSet::new(),
                    pending: HashSet::new(),
                    next_sequence: 1,
                    closed: false,
                    degraded: false,
                    stats: PoolStats::default(),
                }),
                available: Condvar::new(),
                drained: Condvar::new(),
            }),
        })
    }

    /// Process-unique identifier of this pool.
    pub fn id(&self) -> u64 {
        self.shared.id
    }

    pub fn config(&self) -> &PoolConfig {
        &self.shared.config
    }

    /// Leases a buffer with its offset at zero.
    ///
    /// Pops the free stack first, then allocates while under the limit,
    /// then applies the overflow policy.
    pub fn acquire(&self) -> Result<Buffer, BufferError> {
        let shared = &self.shared;
        let config = &shared.config;
        let mut state = shared.state.lock();
        let mut deadline: Option<Instant> = None;

        loop {
            if state.closed {
                return Err(BufferError::Closed);
            }
            if state.degraded {
                state.stats.record_allocation_failure();
                return Err(BufferError::AllocationFailed {
                    bytes: config.buffer_capacity.as_bytes(),
                });
            }

            if let Some(slot) = state.free.pop() {
                state.outstanding.insert(slot.sequence);
                state.stats.record_recycled();
                drop(state);
                return Ok(Buffer::leased(slot.sequence, slot.storage, Arc::clone(shared)));
            }

            let at_limit = match config.overflow_policy {
                OverflowPolicy::Unbounded => false,
                _ => state.live() >= config.max_buffers,
            };

            if !at_limit {
                let sequence = state.next_sequence;
                state.next_sequence += 1;
                // Reserve the slot before allocating outside the lock.
                state.outstanding.insert(sequence);
                drop(state);
                return self.allocate(sequence);
            }

            match config.overflow_policy {
                OverflowPolicy::DropNewest => {
                    state.stats.record_dropped();
                    tracing::debug!(pool = shared.id, "pool exhausted, dropping request");
                    return Err(BufferError::Exhausted {
                        max_buffers: config.max_buffers,
                    });
                }
                _ => {
                    let deadline =
                        *deadline.get_or_insert_with(|| Instant::now() + config.block_timeout);
                    if Instant::now() >= deadline {
                        state.stats.record_timeout();
                        tracing::debug!(pool = shared.id, "timed out waiting for a free buffer");
                        return Err(BufferError::TimedOut {
                            waited_ms: config.block_timeout.as_millis() as u64,
                        });
                    }
                    shared.available.wait_until(&mut state, deadline);
                }
            }
        }
    }

    fn allocate(&self, sequence: u64) -> Result<Buffer, BufferError> {
        let shared = &self.shared;
        let bytes = shared.config.buffer_capacity.as_bytes();

        match allocate_storage(bytes) {
            Some(storage) => {
                let mut state = shared.state.lock();
                state.stats.record_fresh();
                let live = state.live();
                state.stats.update_peak(live);
                drop(state);
                Ok(Buffer::leased(sequence, storage, Arc::clone(shared)))
            }
            None => {
                let mut state = shared.state.lock();
                state.outstanding.remove(&sequence);
                state.degraded = true;
                state.stats.record_allocation_failure();
                // Blocked acquirers must observe the degraded state.
                shared.available.notify_all();
                tracing::error!(
                    pool = shared.id,
                    bytes,
                    "buffer allocation failed, pool disabled"
                );
                Err(BufferError::AllocationFailed { bytes })
            }
        }
    }

    /// Retires `buffer` and keeps it pending until the returned
    /// [`RetiredBuffer`] is recycled or dropped.
    ///
    /// Pending buffers still count against `max_buffers`.
    pub fn retire(&self, buffer: Buffer) -> Result<RetiredBuffer, BufferError> {
        let shared = &self.shared;
        let sequence = buffer.sequence();

        if buffer.origin() != Some(shared.id) {
            let origin = buffer.origin();
            shared.state.lock().stats.misuse += 1;
            tracing::warn!(pool = shared.id, sequence, ?origin, "foreign buffer retired");
            return Err(BufferError::ForeignBuffer {
                sequence,
                origin,
                pool: shared.id,
            });
        }

        let mut state = shared.state.lock();
        if !state.outstanding.remove(&sequence) {
            let closed = state.closed;
            if !closed {
                state.stats.misuse += 1;
            }
            drop(state);
            drop(buffer.into_storage());
            if closed {
                tracing::debug!(pool = shared.id, sequence, "late retirement discarded");
                return Err(BufferError::Closed);
            }
            tracing::warn!(pool = shared.id, sequence, "buffer retired twice");
            return Err(BufferError::AlreadyRetired { sequence });
        }
        state.pending.insert(sequence);
        state.stats.retirements += 1;
        drop(state);

        let mut buffer = buffer;
        buffer.mark_retired();
        let len = buffer.offset();
        Ok(RetiredBuffer::new(
            sequence,
            buffer.into_storage(),
            len,
            Arc::clone(shared),
        ))
    }

    /// Retires `buffer` and recycles it onto the free stack immediately.
    pub fn reclaim(&self, buffer: Buffer) -> Result<(), BufferError> {
        self.retire(buffer)?.recycle();
        Ok(())
    }

    /// Closes the pool and waits up to `grace` for leased and pending
    /// buffers to come back. Whatever is still out afterwards is
    /// forcibly reclaimed; its late retirement is silently discarded.
    pub fn shutdown(&self, grace: Duration) -> ShutdownReport {
        let shared = &self.shared;
        let mut state = shared.state.lock();
        state.closed = true;
        shared.available.notify_all();

        let outstanding_at_close = state.outstanding.len() + state.pending.len();
        let deadline = Instant::now() + grace;
        while !state.drained() {
            if shared.drained.wait_until(&mut state, deadline).timed_out() {
                break;
            }
        }

        let discarded = state.outstanding.len() + state.pending.len();
        if discarded > 0 {
            tracing::warn!(
                pool = shared.id,
                discarded,
                "buffers not retired within grace period, discarding"
            );
        }
        state.outstanding.clear();
        state.pending.clear();
        state.free.clear();
        state.stats.discarded += discarded as u64;

        ShutdownReport {
            outstanding_at_close,
            discarded,
        }
    }

    /// Waits up to `timeout` for every retired buffer to be recycled.
    ///
    /// Returns `false` if some are still pending when the time runs out.
    pub fn wait_for_pending(&self, timeout: Duration) -> bool {
        let shared = &self.shared;
        let mut state = shared.state.lock();
        let deadline = Instant::now() + timeout;
        while !state.pending.is_empty() {
            if shared.drained.wait_until(&mut state, deadline).timed_out() {
                return state.pending.is_empty();
            }
        }
        true
    }

    /// Releases the storage of every free buffer.
    pub fn shrink(&self) -> usize {
        let mut state = self.shared.state.lock();
        let released = state.free.len();
        state.free.clear();
        released
    }

    /// Buffers currently leased to producers.
    pub fn outstanding(&self) -> usize {
        self.shared.state.lock().outstanding.len()
    }

    pub fn free_count(&self) -> usize {
        self.shared.state.lock().free.len()
    }

    /// Retired buffers that have not been recycled yet.
    pub fn pending_count(&self) -> usize {
        self.shared.state.lock().pending.len()
    }

    /// Free, outstanding and pending buffers combined.
    pub fn live_buffers(&self) -> usize {
        self.shared.state.lock().live()
    }

    pub fn is_closed(&self) -> bool {
        self.shared.state.lock().closed
    }

    /// Returns a snapshot of pool statistics.
    pub fn stats(&self) -> PoolStats {
        self.shared.state.lock().stats.clone()
    }
}

fn allocate_storage(bytes: usize) -> Option<Vec<u8>> {
    let mut storage = Vec::new();
    storage.try_reserve_exact(bytes).ok()?;
    storage.resize(bytes, 0);
    Some(storage)
}

impl std::fmt::Debug for BufferPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.shared.state.lock();
        f.debug_struct("BufferPool")
            .field("id", &self.shared.id)
            .field("config", &self.shared.config)
            .field("free", &state.free.len())
            .field("outstanding", &state.outstanding.len())
            .field("pending", &state.pending.len())
            .field("closed", &state.closed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BufferState;
    use std::thread;

    fn pool(max: usize, policy: OverflowPolicy) -> BufferPool {
        BufferPool::new(PoolConfig {
            buffer_capacity: BufferCapacity::from_bytes(64),
            max_buffers: max,
            overflow_policy: policy,
            block_timeout: Duration::from_millis(20),
        })
        .unwrap()
    }

    #[test]
    fn test_acquire_distinct_buffers() {
        let p = pool(2, OverflowPolicy::Block);
        let a = p.acquire().unwrap();
        let b = p.acquire().unwrap();
        assert_ne!(a.sequence(), b.sequence());
        assert_eq!(a.state(), BufferState::InUse);
        assert_eq!(a.capacity(), 64);
        assert_eq!(p.outstanding(), 2);
    }

    #[test]
    fn test_recycle_resets_offset() {
        let p = pool(1, OverflowPolicy::Block);
        let mut a = p.acquire().unwrap();
        a.write(b"event").unwrap();
        let seq = a.sequence();
        p.reclaim(a).unwrap();

        let again = p.acquire().unwrap();
        assert_eq!(again.sequence(), seq);
        assert_eq!(again.offset(), 0);
        assert_eq!(p.stats().recycled, 1);
    }

    #[test]
    fn test_free_stack_is_lifo() {
        let p = pool(3, OverflowPolicy::Block);
        let a = p.acquire().unwrap();
        let b = p.acquire().unwrap();
        let (sa, sb) = (a.sequence(), b.sequence());
        p.reclaim(a).unwrap();
        p.reclaim(b).unwrap();

        let top = p.acquire().unwrap();
        let next = p.acquire().unwrap();
        assert_eq!(top.sequence(), sb);
        assert_eq!(next.sequence(), sa);
    }

    #[test]
    fn test_drop_newest_returns_immediately() {
        let p = pool(1, OverflowPolicy::DropNewest);
        let _a = p.acquire().unwrap();
        let start = Instant::now();
        let err = p.acquire().unwrap_err();
        assert!(start.elapsed() < Duration::from_millis(20));
        assert_eq!(err, BufferError::Exhausted { max_buffers: 1 });
        assert_eq!(p.stats().dropped, 1);
    }

    #[test]
    fn test_block_times_out() {
        let p = pool(1, OverflowPolicy::Block);
        let _a = p.acquire().unwrap();
        let start = Instant::now();
        let err = p.acquire().unwrap_err();
        assert!(start.elapsed() >= Duration::from_millis(20));
        assert!(matches!(err, BufferError::TimedOut { .. }));
        assert_eq!(p.stats().timeouts, 1);
    }

    #[test]
    fn test_block_wakes_on_reclaim() {
        let p = BufferPool::new(PoolConfig {
            buffer_capacity: BufferCapacity::from_bytes(64),
            max_buffers: 1,
            overflow_policy: OverflowPolicy::Block,
            block_timeout: Duration::from_secs(5),
        })
        .unwrap();
        let mut a = p.acquire().unwrap();
        a.write(b"xyz").unwrap();
        let seq = a.sequence();

        let waiter = {
            let p = p.clone();
            thread::spawn(move || p.acquire().map(|b| (b.sequence(), b.offset())))
        };
        thread::sleep(Duration::from_millis(50));
        p.reclaim(a).unwrap();

        let (got_seq, offset) = waiter.join().unwrap().unwrap();
        assert_eq!(got_seq, seq);
        assert_eq!(offset, 0);
    }

    #[test]
    fn test_unbounded_exceeds_limit() {
        let p = pool(1, OverflowPolicy::Unbounded);
        let held: Vec<_> = (0..4).map(|_| p.acquire().unwrap()).collect();
        assert_eq!(held.len(), 4);
        assert_eq!(p.live_buffers(), 4);
        assert_eq!(p.stats().peak_buffers, 4);
    }

    #[test]
    fn test_allocation_failure_degrades_pool() {
        let p = BufferPool::new(PoolConfig {
            buffer_capacity: BufferCapacity::from_bytes(usize::MAX),
            max_buffers: 1,
            overflow_policy: OverflowPolicy::Unbounded,
            block_timeout: Duration::ZERO,
        })
        .unwrap();
        assert!(matches!(
            p.acquire(),
            Err(BufferError::AllocationFailed { .. })
        ));
        assert!(matches!(
            p.acquire(),
            Err(BufferError::AllocationFailed { .. })
        ));
        assert_eq!(p.stats().allocation_failures, 2);
        assert_eq!(p.live_buffers(), 0);
    }

    #[test]
    fn test_foreign_buffer_is_misuse() {
        let p = pool(1, OverflowPolicy::Block);
        let other = pool(1, OverflowPolicy::Block);
        let theirs = other.acquire().unwrap();

        let err = p.reclaim(theirs).unwrap_err();
        assert!(err.is_misuse());
        assert_eq!(p.stats().misuse, 1);
        // The foreign buffer went home to its own pool on drop.
        assert_eq!(other.outstanding(), 0);
        assert_eq!(other.free_count(), 1);
    }

    #[test]
    fn test_detached_buffer_is_foreign() {
        let p = pool(1, OverflowPolicy::Block);
        let err = p.reclaim(Buffer::detached(8)).unwrap_err();
        assert!(matches!(err, BufferError::ForeignBuffer { origin: None, .. }));
    }

    #[test]
    fn test_unknown_sequence_is_already_retired() {
        let p = pool(2, OverflowPolicy::Block);
        let forged = Buffer::leased(99, vec![0; 64], Arc::clone(&p.shared));
        let err = p.reclaim(forged).unwrap_err();
        assert_eq!(err, BufferError::AlreadyRetired { sequence: 99 });
        assert_eq!(p.free_count(), 0);
    }

    #[test]
    fn test_dropped_lease_is_abandoned() {
        let p = pool(1, OverflowPolicy::DropNewest);
        drop(p.acquire().unwrap());
        assert_eq!(p.outstanding(), 0);
        assert_eq!(p.stats().abandoned, 1);
        assert!(p.acquire().is_ok());
    }

    #[test]
    fn test_pending_counts_against_limit() {
        let p = pool(1, OverflowPolicy::DropNewest);
        let mut a = p.acquire().unwrap();
        a.write(b"payload").unwrap();
        let retired = p.retire(a).unwrap();
        assert_eq!(retired.data(), b"payload");
        assert_eq!(p.pending_count(), 1);
        assert!(p.acquire().is_err());

        retired.recycle();
        assert_eq!(p.pending_count(), 0);
        assert_eq!(p.acquire().unwrap().offset(), 0);
    }

    #[test]
    fn test_shutdown_discards_after_grace() {
        let p = pool(2, OverflowPolicy::Block);
        let held = p.acquire().unwrap();
        let report = p.shutdown(Duration::from_millis(10));
        assert_eq!(report.outstanding_at_close, 1);
        assert_eq!(report.discarded, 1);
        assert!(p.is_closed());
        assert_eq!(p.acquire().unwrap_err(), BufferError::Closed);

        // Late retirement is dropped without counting as misuse.
        assert_eq!(p.reclaim(held).unwrap_err(), BufferError::Closed);
        assert_eq!(p.stats().misuse, 0);
        assert_eq!(p.stats().discarded, 1);
    }

    #[test]
    fn test_shutdown_waits_for_retirement() {
        let p = pool(2, OverflowPolicy::Block);
        let held = p.acquire().unwrap();
        let producer = {
            let p = p.clone();
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(20));
                p.reclaim(held)
            })
        };
        let report = p.shutdown(Duration::from_secs(5));
        assert!(producer.join().unwrap().is_ok());
        assert_eq!(report.outstanding_at_close, 1);
        assert_eq!(report.discarded, 0);
        assert_eq!(p.free_count(), 0);
    }

    #[test]
    fn test_shutdown_wakes_blocked_acquirer() {
        let p = BufferPool::new(PoolConfig {
            buffer_capacity: BufferCapacity::from_bytes(8),
            max_buffers: 1,
            overflow_policy: OverflowPolicy::Block,
            block_timeout: Duration::from_secs(30),
        })
        .unwrap();
        let _held = p.acquire().unwrap();
        let waiter = {
            let p = p.clone();
            thread::spawn(move || p.acquire())
        };
        thread::sleep(Duration::from_millis(20));
        p.shutdown(Duration::ZERO);
        assert_eq!(waiter.join().unwrap().unwrap_err(), BufferError::Closed);
    }

    #[test]
    fn test_wait_for_pending() {
        let p = pool(2, OverflowPolicy::Block);
        assert!(p.wait_for_pending(Duration::ZERO));

        let retired = p.retire(p.acquire().unwrap()).unwrap();
        assert!(!p.wait_for_pending(Duration::from_millis(5)));

        let persister = thread::spawn(move || {
            thread::sleep(Duration::from_millis(10));
            retired.recycle();
        });
        assert!(p.wait_for_pending(Duration::from_secs(5)));
        persister.join().unwrap();
    }

    #[test]
    fn test_shrink_releases_free() {
        let p = pool(2, OverflowPolicy::Block);
        let a = p.acquire().unwrap();
        p.reclaim(a).unwrap();
        assert_eq!(p.shrink(), 1);
        assert_eq!(p.live_buffers(), 0);
    }

    #[test]
    fn test_invalid_config() {
        let cfg = PoolConfig {
            max_buffers: 0,
            ..Default::default()
        };
        assert!(BufferPool::new(cfg).is_err());
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!(OverflowPolicy::parse("Block").unwrap(), OverflowPolicy::Block);
        assert_eq!(
            OverflowPolicy::parse("drop-newest").unwrap(),
            OverflowPolicy::DropNewest
        );
        assert_eq!(
            OverflowPolicy::parse("unbounded").unwrap(),
            OverflowPolicy::Unbounded
        );
        assert!(OverflowPolicy::parse("spill").is_err());
        assert_eq!(OverflowPolicy::DropNewest.to_string(), "drop-newest");
    }

    #[test]
    fn test_debug_format() {
        let p = pool(1, OverflowPolicy::Block);
        let debug = format!("{p:?}");
        assert!(debug.contains("BufferPool"));
        assert!(debug.contains("outstanding"));
    }
}
