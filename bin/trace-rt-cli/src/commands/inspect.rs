// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `trace-rt inspect` command: print resolved session options.

use std::path::PathBuf;
use trace_session::SessionOptions;

pub async fn execute(config: Option<PathBuf>) -> anyhow::Result<()> {
    let options = super::load_options(config.as_deref(), SessionOptions::default())?;
    let pool = options.pool_config()?;

    println!("╔══════════════════════════════════════════════════════╗");
    println!("║           trace-rt · Session Options                 ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();
    println!("  Kind:            {}", options.kind);
    println!("  Buffer capacity: {}", pool.buffer_capacity);
    println!("  Max buffers:     {}", pool.max_buffers);
    println!("  Overflow policy: {}", pool.overflow_policy);
    println!("  Block timeout:   {}ms", options.block_timeout_ms);
    println!("  Shutdown grace:  {}ms", options.shutdown_grace_ms);
    println!("  Retained chunks: {}", options.retained_chunks());
    println!(
        "  Peak memory:     {:.2} MB",
        (pool.buffer_capacity.as_bytes() * pool.max_buffers) as f64 / (1024.0 * 1024.0)
    );
    println!();
    println!("{}", options.to_toml()?);
    Ok(())
}
