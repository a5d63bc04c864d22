// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Overhead measurement.
//!
//! [`measure_overhead`] drives a session with a fixed number of event
//! writes and reports the cost per event. Running it once against a
//! [`NullSession`](crate::NullSession) and once against an active session
//! separates the framework's baseline from the cost of recording.

use crate::{Producer, Session, SessionKind};
use std::time::{Duration, Instant};

/// Result of an overhead run.
#[derive(Debug, Clone, serde::Serialize)]
pub struct OverheadReport {
    pub kind: SessionKind,
    /// Events attempted.
    pub iterations: u64,
    /// Events that landed in a buffer.
    pub recorded: u64,
    /// Events skipped for lack of a buffer.
    pub skipped: u64,
    pub total_duration: Duration,
}

impl OverheadReport {
    /// Average nanoseconds per attempted event.
    pub fn ns_per_event(&self) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        self.total_duration.as_nanos() as f64 / self.iterations as f64
    }

    /// Adds another run (e.g. from a second producer thread) to this one.
    pub fn merge(&mut self, other: &OverheadReport) {
        self.iterations += other.iterations;
        self.recorded += other.recorded;
        self.skipped += other.skipped;
        self.total_duration = self.total_duration.max(other.total_duration);
    }

    /// Returns a human-readable summary suitable for CLI output.
    pub fn summary(&self) -> String {
        format!(
            "{} session: {} events in {:.2}ms ({:.1} ns/event), {} recorded, {} skipped",
            self.kind,
            self.iterations,
            self.total_duration.as_secs_f64() * 1000.0,
            self.ns_per_event(),
            self.recorded,
            self.skipped,
        )
    }
}

/// Writes `payload` `iterations` times through a [`Producer`] on the
/// calling thread. The session must already be recording.
pub fn measure_overhead<S: Session + ?Sized>(
    session: &S,
    iterations: u64,
    payload: &[u8],
) -> OverheadReport {
    let mut recorded = 0;
    let start = Instant::now();
    {
        let mut producer = Producer::new(session);
        for _ in 0..iterations {
            if producer.record(payload) {
                recorded += 1;
            }
        }
    }
    let total_duration = start.elapsed();

    OverheadReport {
        kind: session.kind(),
        iterations,
        recorded,
        skipped: iterations - recorded,
        total_duration,
    }
}
