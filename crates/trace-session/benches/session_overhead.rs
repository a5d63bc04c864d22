// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Benchmarks for the per-event cost of each session variant.
//!
//! The null numbers are the framework's floor; the gap to the memory
//! numbers is the cost of actually recording.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;
use trace_buffer::OverflowPolicy;
use trace_session::{
    create_session, LoggingTraceManager, NullSession, Producer, Session, SessionKind,
    SessionOptions,
};

fn options(kind: SessionKind) -> Arc<SessionOptions> {
    Arc::new(SessionOptions {
        kind,
        buffer_capacity: "64K".into(),
        max_buffers: 4,
        overflow_policy: OverflowPolicy::DropNewest,
        ..Default::default()
    })
}

fn bench_null_next_retire(c: &mut Criterion) {
    let session = NullSession::new(
        Arc::new(LoggingTraceManager::new()),
        options(SessionKind::Null),
    );
    session.start().unwrap();
    c.bench_function("null/next_retire", |b| {
        b.iter(|| {
            let buffer = session.next_buffer();
            session.retire_buffer(black_box(buffer));
        })
    });
}

fn bench_record_event(c: &mut Criterion) {
    let mut group = c.benchmark_group("record_event");
    for kind in [SessionKind::Null, SessionKind::Memory] {
        let session =
            create_session(Arc::new(LoggingTraceManager::new()), options(kind), None).unwrap();
        session.start().unwrap();
        group.bench_function(kind.to_string(), |b| {
            let mut producer = Producer::new(&session);
            b.iter(|| producer.record(black_box(&[0xABu8; 24])))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_null_next_retire, bench_record_event);
criterion_main!(benches);
