// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Subcommand implementations and shared CLI setup.

pub mod inspect;
pub mod overhead;

use std::path::Path;
use trace_session::SessionOptions;
use tracing_subscriber::EnvFilter;

/// Initialises `tracing` output. `RUST_LOG` wins over the `-v` count.
pub fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Loads options from `config` if given, otherwise returns `fallback`.
pub fn load_options(
    config: Option<&Path>,
    fallback: SessionOptions,
) -> anyhow::Result<SessionOptions> {
    match config {
        Some(path) => Ok(SessionOptions::from_file(path)?),
        None => Ok(fallback),
    }
}
