// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Session options loaded from TOML files or constructed programmatically.
//!
//! Options are read once when a session is built and never change
//! afterwards; sessions share them through an `Arc`.
//!
//! # TOML Format
//! ```toml
//! kind = "streaming"
//! buffer_capacity = "64K"
//! max_buffers = 8
//! overflow_policy = "drop-newest"
//! block_timeout_ms = 5
//! shutdown_grace_ms = 250
//! ```

use crate::{SessionError, SessionKind};
use std::path::Path;
use std::time::Duration;
use trace_buffer::{BufferCapacity, OverflowPolicy, PoolConfig};

/// Configuration consumed at session construction.
///
/// The null variant ignores every field except `kind`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SessionOptions {
    /// Which session variant to build.
    pub kind: SessionKind,
    /// Size of each buffer (human-readable, e.g. `"1M"`).
    pub buffer_capacity: String,
    /// Maximum live buffers in the pool.
    pub max_buffers: usize,
    pub overflow_policy: OverflowPolicy,
    /// How long a `block` acquire waits for a recycled buffer.
    pub block_timeout_ms: u64,
    /// How long teardown waits for producers to retire their buffers.
    pub shutdown_grace_ms: u64,
    /// Chunks kept by the in-memory session (defaults to `max_buffers`).
    pub retained_chunks: Option<usize>,
}

impl SessionOptions {
    /// Loads options from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, SessionError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SessionError::Config(format!("cannot read options '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses options from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, SessionError> {
        toml::from_str(toml_str)
            .map_err(|e| SessionError::Config(format!("TOML parse error: {e}")))
    }

    /// Serialises options to TOML.
    pub fn to_toml(&self) -> Result<String, SessionError> {
        toml::to_string_pretty(self)
            .map_err(|e| SessionError::Config(format!("TOML serialise error: {e}")))
    }

    /// Parses the buffer capacity string.
    pub fn parse_capacity(&self) -> Result<BufferCapacity, SessionError> {
        BufferCapacity::parse(&self.buffer_capacity)
            .map_err(|e| SessionError::Config(format!("invalid buffer capacity: {e}")))
    }

    pub fn block_timeout(&self) -> Duration {
        Duration::from_millis(self.block_timeout_ms)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_millis(self.shutdown_grace_ms)
    }

    /// Number of chunks the in-memory session keeps.
    pub fn retained_chunks(&self) -> usize {
        self.retained_chunks.unwrap_or(self.max_buffers).max(1)
    }

    /// Builds the pool configuration for active session variants.
    pub fn pool_config(&self) -> Result<PoolConfig, SessionError> {
        let config = PoolConfig {
            buffer_capacity: self.parse_capacity()?,
            max_buffers: self.max_buffers,
            overflow_policy: self.overflow_policy,
            block_timeout: self.block_timeout(),
        };
        config
            .validate()
            .map_err(|e| SessionError::Config(e.to_string()))?;
        Ok(config)
    }
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            kind: SessionKind::Memory,
            buffer_capacity: "1M".to_string(),
            max_buffers: 16,
            overflow_policy: OverflowPolicy::Block,
            block_timeout_ms: 10,
            shutdown_grace_ms: 100,
            retained_chunks: None,
        }
    }
}
