// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Buffer bookkeeping shared by the pooled session variants.

use super::lifecycle::Lifecycle;
use crate::{Diagnostic, SessionError, SessionId, SessionOptions, SessionState, TraceManager};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use trace_buffer::{Buffer, BufferError, BufferPool, PoolStats, RetiredBuffer, ShutdownReport};

pub(crate) struct ActiveCore {
    id: SessionId,
    manager: Arc<dyn TraceManager>,
    options: Arc<SessionOptions>,
    pool: BufferPool,
    lifecycle: Lifecycle,
    /// Allocation failure is reported once; the pool stays degraded.
    allocation_reported: AtomicBool,
}

impl ActiveCore {
    pub(crate) fn new(
        manager: Arc<dyn TraceManager>,
        options: Arc<SessionOptions>,
    ) -> Result<Self, SessionError> {
        let pool = BufferPool::new(options.pool_config()?)?;
        let id = manager.allocate_session_id();
        tracing::info!(
            session = %id,
            kind = %options.kind,
            capacity = %pool.config().buffer_capacity,
            max_buffers = pool.config().max_buffers,
            policy = %pool.config().overflow_policy,
            "session created"
        );
        Ok(Self {
            id,
            manager,
            options,
            pool,
            lifecycle: Lifecycle::new(id),
            allocation_reported: AtomicBool::new(false),
        })
    }

    pub(crate) fn id(&self) -> SessionId {
        self.id
    }

    pub(crate) fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub(crate) fn pool(&self) -> &BufferPool {
        &self.pool
    }

    pub(crate) fn state(&self) -> SessionState {
        self.lifecycle.get()
    }

    pub(crate) fn buffer_capacity(&self) -> usize {
        self.pool.config().buffer_capacity.as_bytes()
    }

    pub(crate) fn stats(&self) -> PoolStats {
        self.pool.stats()
    }

    pub(crate) fn report(&self, diagnostic: Diagnostic) {
        self.manager.report(self.id, diagnostic);
    }

    /// Leases a buffer while recording; exhaustion yields `None`.
    pub(crate) fn next_buffer(&self) -> Option<Buffer> {
        if !self.lifecycle.is_recording() {
            return None;
        }
        match self.pool.acquire() {
            // A blocked acquire can outlive `stop()`.
            Ok(buffer) if !self.lifecycle.is_recording() => {
                // Reclaim fails only once the pool is closed; the buffer
                // has then already been discarded.
                let _ = self.pool.reclaim(buffer);
                None
            }
            Ok(buffer) => Some(buffer),
            Err(BufferError::AllocationFailed { bytes }) => {
                if !self.allocation_reported.swap(true, Ordering::Relaxed) {
                    self.report(Diagnostic::AllocationFailure { bytes });
                }
                None
            }
            Err(_) => None,
        }
    }

    /// Retires a buffer into the pending set. Misuse is reported and
    /// late retirements after teardown are dropped.
    pub(crate) fn retire(&self, buffer: Buffer) -> Option<RetiredBuffer> {
        match self.pool.retire(buffer) {
            Ok(retired) => Some(retired),
            Err(e) if e.is_misuse() => {
                self.report(Diagnostic::Misuse(e));
                None
            }
            Err(_) => None,
        }
    }

    pub(crate) fn start(&self) -> Result<(), SessionError> {
        self.lifecycle.start()?;
        tracing::info!(session = %self.id, "recording started");
        Ok(())
    }

    pub(crate) fn stop(&self) -> Result<(), SessionError> {
        self.lifecycle.stop()?;
        tracing::info!(session = %self.id, "recording stopped");
        Ok(())
    }

    pub(crate) fn ensure_live(&self, action: &'static str) -> Result<(), SessionError> {
        self.lifecycle.ensure_live(action)
    }

    /// Stops issuing buffers, then waits out the grace period.
    pub(crate) fn teardown(&self) -> ShutdownReport {
        if !self.lifecycle.tear_down() {
            return ShutdownReport::default();
        }
        let report = self.pool.shutdown(self.options.shutdown_grace());
        if report.discarded > 0 {
            tracing::warn!(
                session = %self.id,
                discarded = report.discarded,
                "buffers discarded after shutdown grace"
            );
        }
        tracing::info!(
            session = %self.id,
            outstanding = report.outstanding_at_close,
            discarded = report.discarded,
            "session torn down"
        );
        report
    }
}
