// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Buffer capacity configuration and parsing.
//!
//! A [`BufferCapacity`] is the fixed byte size of every buffer a pool
//! issues. It parses human-readable sizes so options files can say
//! `"64K"` instead of `65536`.

use crate::BufferError;
use std::fmt;

const KB: usize = 1024;
const MB: usize = 1024 * 1024;

/// Size suffixes, longest first so `"MB"` wins over `"B"`.
const SUFFIXES: [(&str, usize); 5] = [("MB", MB), ("M", MB), ("KB", KB), ("K", KB), ("B", 1)];

/// Fixed byte size of a trace buffer.
///
/// # Parsing
/// - `"64K"` or `"64KB"` → 64 × 1024 bytes
/// - `"1M"` or `"1MB"` → 1024² bytes
/// - `"4096"` or `"4096B"` → raw byte count
///
/// # Examples
/// ```
/// use trace_buffer::BufferCapacity;
///
/// let c = BufferCapacity::parse("64K").unwrap();
/// assert_eq!(c.as_bytes(), 64 * 1024);
/// assert_eq!(c.to_string(), "64 KB");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct BufferCapacity {
    bytes: usize,
}

impl BufferCapacity {
    /// Default capacity of a session buffer: 1 MB.
    pub const DEFAULT: BufferCapacity = BufferCapacity { bytes: 1024 * 1024 };

    /// Creates a capacity from a byte count.
    pub fn from_bytes(bytes: usize) -> Self {
        Self { bytes }
    }

    /// Creates a capacity from kilobytes.
    pub fn from_kb(kb: usize) -> Self {
        Self { bytes: kb * 1024 }
    }

    /// Returns the capacity in bytes.
    pub fn as_bytes(&self) -> usize {
        self.bytes
    }

    /// Parses a human-readable capacity string. Case-insensitive.
    pub fn parse(s: &str) -> Result<Self, BufferError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(BufferError::InvalidConfig("empty buffer capacity".into()));
        }

        let (num_str, multiplier) = SUFFIXES
            .iter()
            .find_map(|&(suffix, multiplier)| {
                let split = s.len().checked_sub(suffix.len())?;
                let tail = s.get(split..)?;
                tail.eq_ignore_ascii_case(suffix)
                    .then(|| (&s[..split], multiplier))
            })
            .unwrap_or((s, 1));

        let value: usize = num_str.trim().parse().map_err(|_| {
            BufferError::InvalidConfig(format!(
                "invalid buffer capacity '{s}': expected a number with an optional K or M suffix"
            ))
        })?;

        let bytes = value
            .checked_mul(multiplier)
            .ok_or_else(|| BufferError::InvalidConfig(format!("buffer capacity overflow: '{s}'")))?;

        if bytes == 0 {
            return Err(BufferError::InvalidConfig(
                "buffer capacity must be non-zero".into(),
            ));
        }

        Ok(Self { bytes })
    }
}

impl Default for BufferCapacity {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for BufferCapacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.bytes >= 1024 * 1024 && self.bytes % (1024 * 1024) == 0 {
            write!(f, "{} MB", self.bytes / (1024 * 1024))
        } else if self.bytes >= 1024 && self.bytes % 1024 == 0 {
            write!(f, "{} KB", self.bytes / 1024)
        } else {
            write!(f, "{} B", self.bytes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_suffixes() {
        assert_eq!(BufferCapacity::parse("4K").unwrap().as_bytes(), 4096);
        assert_eq!(BufferCapacity::parse("4kb").unwrap().as_bytes(), 4096);
        assert_eq!(BufferCapacity::parse("1M").unwrap().as_bytes(), 1024 * 1024);
        assert_eq!(BufferCapacity::parse("2mb").unwrap().as_bytes(), 2 * 1024 * 1024);
        assert_eq!(BufferCapacity::parse("512B").unwrap().as_bytes(), 512);
        assert_eq!(BufferCapacity::parse("3 kB").unwrap().as_bytes(), 3 * 1024);
    }

    #[test]
    fn test_parse_rejects_bare_or_unknown_suffix() {
        assert!(BufferCapacity::parse("MB").is_err());
        assert!(BufferCapacity::parse("B").is_err());
        assert!(BufferCapacity::parse("4G").is_err());
        assert!(BufferCapacity::parse("4é").is_err());
    }

    #[test]
    fn test_parse_raw_bytes() {
        assert_eq!(BufferCapacity::parse(" 4096 ").unwrap().as_bytes(), 4096);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(BufferCapacity::parse("").is_err());
        assert!(BufferCapacity::parse("lots").is_err());
        assert!(BufferCapacity::parse("0K").is_err());
        assert!(BufferCapacity::parse("99999999999999999999M").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(BufferCapacity::from_kb(1024).to_string(), "1 MB");
        assert_eq!(BufferCapacity::from_kb(4).to_string(), "4 KB");
        assert_eq!(BufferCapacity::from_bytes(100).to_string(), "100 B");
    }

    #[test]
    fn test_default_is_one_megabyte() {
        assert_eq!(BufferCapacity::default().as_bytes(), 1024 * 1024);
    }

    #[test]
    fn test_serde_roundtrip() {
        let c = BufferCapacity::from_kb(64);
        let json = serde_json::to_string(&c).unwrap();
        let back: BufferCapacity = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }
}
