// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # trace-session
//!
//! Tracing sessions: the per-recording coordinators that supply producer
//! threads with trace buffers and take them back.
//!
//! Three variants share one contract, [`Session`]:
//! - [`NullSession`] records nothing and costs (close to) nothing; it
//!   exists to measure the framework's own overhead.
//! - [`MemorySession`] keeps recent buffer contents in a bounded ring.
//! - [`StreamingSession`] hands retired buffers to a [`BufferSink`].
//!
//! Sessions are built from immutable [`SessionOptions`] and an explicit
//! [`TraceManager`] handle; there is no global state.
//!
//! # Example
//! ```
//! use std::sync::Arc;
//! use trace_session::{
//!     create_session, LoggingTraceManager, Producer, Session, SessionKind, SessionOptions,
//! };
//!
//! let options = SessionOptions {
//!     kind: SessionKind::Memory,
//!     buffer_capacity: "4K".into(),
//!     max_buffers: 2,
//!     ..Default::default()
//! };
//! let session =
//!     create_session(Arc::new(LoggingTraceManager::new()), Arc::new(options), None).unwrap();
//! session.start().unwrap();
//!
//! let mut producer = Producer::new(&session);
//! assert!(producer.record(b"event"));
//! drop(producer);
//!
//! assert_eq!(session.teardown().discarded, 0);
//! ```

mod config;
mod error;
mod manager;
mod overhead;
mod producer;
pub mod session;
mod sink;

pub use config::SessionOptions;
pub use error::SessionError;
pub use manager::{Diagnostic, LoggingTraceManager, SessionId, TraceManager};
pub use overhead::{measure_overhead, OverheadReport};
pub use producer::Producer;
pub use session::{
    create_session, AnySession, MemorySession, NullSession, Session, SessionKind, SessionState,
    StreamingSession,
};
pub use sink::{BufferSink, ChannelSink};
