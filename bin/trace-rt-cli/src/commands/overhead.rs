// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `trace-rt overhead` command: drive a session from producer threads.
//!
//! Each producer runs on a blocking task and writes synthetic events
//! through its own [`Producer`](trace_session::Producer). For streaming
//! sessions a tokio task stands in for the persistence writer and simply
//! recycles what it receives.

use anyhow::Context;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use trace_buffer::OverflowPolicy;
use trace_session::{
    create_session, measure_overhead, AnySession, BufferSink, ChannelSink, LoggingTraceManager,
    OverheadReport, Session, SessionKind, SessionOptions,
};

pub struct OverheadArgs {
    pub kind: String,
    pub iterations: u64,
    pub threads: usize,
    pub event_size: usize,
    pub buffer_capacity: String,
    pub max_buffers: usize,
    pub policy: String,
}

impl OverheadArgs {
    fn to_options(&self) -> anyhow::Result<SessionOptions> {
        Ok(SessionOptions {
            kind: SessionKind::parse(&self.kind)?,
            buffer_capacity: self.buffer_capacity.clone(),
            max_buffers: self.max_buffers,
            overflow_policy: OverflowPolicy::parse(&self.policy)?,
            ..Default::default()
        })
    }
}

pub async fn execute(config: Option<PathBuf>, args: OverheadArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.threads > 0, "at least one producer thread is required");
    let options = Arc::new(super::load_options(config.as_deref(), args.to_options()?)?);
    let manager = Arc::new(LoggingTraceManager::new());

    // Streaming sessions need somewhere to send retired buffers.
    let (sink, writer) = if options.kind == SessionKind::Streaming {
        let (sink, mut rx) = ChannelSink::new();
        let writer = tokio::spawn(async move {
            let mut bytes = 0usize;
            while let Some(buffer) = rx.recv().await {
                bytes += buffer.len();
                buffer.recycle();
            }
            bytes
        });
        (Some(Arc::new(sink) as Arc<dyn BufferSink>), Some(writer))
    } else {
        (None, None)
    };

    let session: Arc<AnySession> = Arc::new(
        create_session(manager.clone(), Arc::clone(&options), sink)
            .context("failed to create session")?,
    );
    session.start()?;

    println!("╔══════════════════════════════════════════════════════╗");
    println!("║           trace-rt · Overhead                        ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();
    println!(
        "  Session {} ({}), {} threads × {} events of {} bytes",
        session.id(),
        session.kind(),
        args.threads,
        args.iterations,
        args.event_size,
    );
    println!();

    let payload = Arc::new(vec![0x5Au8; args.event_size]);
    let wall = Instant::now();
    let mut tasks = Vec::with_capacity(args.threads);
    for _ in 0..args.threads {
        let session = Arc::clone(&session);
        let payload = Arc::clone(&payload);
        let iterations = args.iterations;
        tasks.push(tokio::task::spawn_blocking(move || {
            measure_overhead(session.as_ref(), iterations, &payload)
        }));
    }

    let mut total: Option<OverheadReport> = None;
    for (i, task) in tasks.into_iter().enumerate() {
        let report = task.await.context("producer thread panicked")?;
        println!("  [{i:>2}] {}", report.summary());
        match total.as_mut() {
            Some(t) => t.merge(&report),
            None => total = Some(report),
        }
    }
    let elapsed = wall.elapsed();

    let flush_session = Arc::clone(&session);
    tokio::task::spawn_blocking(move || flush_session.flush()).await??;
    let shutdown = {
        let session = Arc::clone(&session);
        tokio::task::spawn_blocking(move || session.teardown()).await?
    };
    let stats = match session.as_ref() {
        AnySession::Null(_) => None,
        AnySession::Memory(s) => Some(s.stats()),
        AnySession::Streaming(s) => Some(s.stats()),
    };
    drop(session);

    println!();
    if let Some(total) = &total {
        println!("  Total: {}", total.summary());
    }
    println!("  Wall:  {:.2}ms", elapsed.as_secs_f64() * 1000.0);
    if let Some(stats) = &stats {
        println!("  Pool:  {}", stats.summary());
    }
    if let Some(writer) = writer {
        let bytes = writer.await?;
        println!("  Sink:  {bytes} bytes streamed");
    }
    println!(
        "  Teardown: {} outstanding, {} discarded, {} diagnostics",
        shutdown.outstanding_at_close,
        shutdown.discarded,
        manager.diagnostics_reported(),
    );

    if tracing::enabled!(tracing::Level::DEBUG) {
        let json = serde_json::json!({ "overhead": total, "pool": stats, "shutdown": shutdown });
        tracing::debug!("{}", serde_json::to_string_pretty(&json)?);
    }
    Ok(())
}
