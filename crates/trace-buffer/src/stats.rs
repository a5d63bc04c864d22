// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Pool statistics for profiling and diagnostics.
//!
//! [`PoolStats`] counts how buffers flowed through a pool: how many
//! requests were served from the free stack, how many needed fresh
//! storage, and how many were refused under the overflow policy.

/// Cumulative statistics about buffer pool usage.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct PoolStats {
    /// Total number of acquire requests, successful or not.
    pub total_requests: u64,
    /// Requests served by recycling a free buffer.
    pub recycled: u64,
    /// Requests that allocated fresh storage.
    pub fresh_allocations: u64,
    /// Requests refused immediately under `DropNewest`.
    pub dropped: u64,
    /// Requests that gave up after the `Block` timeout.
    pub timeouts: u64,
    /// Requests refused because storage could not be allocated.
    pub allocation_failures: u64,
    /// Buffers retired by their owner.
    pub retirements: u64,
    /// Leased buffers dropped without being retired.
    pub abandoned: u64,
    /// Foreign or double retirements.
    pub misuse: u64,
    /// Buffers forcibly reclaimed at shutdown.
    pub discarded: u64,
    /// High-water mark of live buffers (in use, free and pending).
    pub peak_buffers: usize,
}

impl PoolStats {
    /// Fraction of successful acquisitions served from the free stack.
    ///
    /// Returns `0.0` if nothing has been handed out yet.
    pub fn reuse_ratio(&self) -> f64 {
        let served = self.recycled + self.fresh_allocations;
        if served == 0 {
            return 0.0;
        }
        self.recycled as f64 / served as f64
    }

    pub(crate) fn record_recycled(&mut self) {
        self.total_requests += 1;
        self.recycled += 1;
    }

    pub(crate) fn record_fresh(&mut self) {
        self.total_requests += 1;
        self.fresh_allocations += 1;
    }

    pub(crate) fn record_dropped(&mut self) {
        self.total_requests += 1;
        self.dropped += 1;
    }

    pub(crate) fn record_timeout(&mut self) {
        self.total_requests += 1;
        self.timeouts += 1;
    }

    pub(crate) fn record_allocation_failure(&mut self) {
        self.total_requests += 1;
        self.allocation_failures += 1;
    }

    pub(crate) fn update_peak(&mut self, live: usize) {
        if live > self.peak_buffers {
            self.peak_buffers = live;
        }
    }

    /// Returns a human-readable summary.
    pub fn summary(&self) -> String {
        format!(
            "Buffers: {} requests ({} recycled, {} fresh, {:.0}% reuse), \
             {} dropped, {} timeouts, {} alloc failures, {} retired, \
             {} abandoned, {} misuse, {} discarded, peak {}",
            self.total_requests,
            self.recycled,
            self.fresh_allocations,
            self.reuse_ratio() * 100.0,
            self.dropped,
            self.timeouts,
            self.allocation_failures,
            self.retirements,
            self.abandoned,
            self.misuse,
            self.discarded,
            self.peak_buffers,
        )
    }
}
