// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # trace-rt
//!
//! Command-line driver for the tracing session framework.
//!
//! ## Usage
//! ```bash
//! # Baseline: how much does instrumentation cost when nothing is recorded?
//! trace-rt overhead --kind null --iterations 1000000
//!
//! # Compare against an in-memory recording with 4 producer threads
//! trace-rt overhead --kind memory --threads 4 --buffer-capacity 64K
//!
//! # Show the options a config file resolves to
//! trace-rt --config session.toml inspect
//! ```

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "trace-rt",
    about = "Measure and inspect tracing session overhead",
    version,
    author
)]
struct Cli {
    /// Path to a TOML session options file (overrides CLI arguments).
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record synthetic events through a session and report the cost per event.
    Overhead {
        /// Session variant: null, memory, streaming.
        #[arg(short, long, default_value = "null")]
        kind: String,

        /// Events written by each producer thread.
        #[arg(short, long, default_value_t = 100_000)]
        iterations: u64,

        /// Number of producer threads.
        #[arg(short, long, default_value_t = 1)]
        threads: usize,

        /// Size of each synthetic event in bytes.
        #[arg(long, default_value_t = 32)]
        event_size: usize,

        /// Capacity of each buffer (e.g., "64K", "1M").
        #[arg(short = 'b', long, default_value = "1M")]
        buffer_capacity: String,

        /// Maximum live buffers in the pool.
        #[arg(short, long, default_value_t = 16)]
        max_buffers: usize,

        /// Overflow policy: block, drop-newest, unbounded.
        #[arg(short, long, default_value = "block")]
        policy: String,
    },

    /// Print the resolved session options as TOML.
    Inspect,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    commands::init_tracing(cli.verbose);

    match cli.command {
        Commands::Overhead {
            kind,
            iterations,
            threads,
            event_size,
            buffer_capacity,
            max_buffers,
            policy,
        } => {
            let args = commands::overhead::OverheadArgs {
                kind,
                iterations,
                threads,
                event_size,
                buffer_capacity,
                max_buffers,
                policy,
            };
            commands::overhead::execute(cli.config, args).await
        }
        Commands::Inspect => commands::inspect::execute(cli.config).await,
    }
}
