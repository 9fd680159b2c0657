// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Additional outputs for Quill log channels.
//!
//! This crate provides:
//! - [`LogRecord`] - A captured message with timestamp, channel, severity, prefix and indent
//! - [`MemoryOutput`] - A thread-safe ring buffer output with live subscription
//! - [`TracingOutput`] - An output that re-emits channel messages as `tracing` events
//! - [`ChannelLayer`] - A tracing Layer that writes `tracing` events into a channel
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use quill_log_core::{ChannelRegistry, CORE};
//! use quill_log_outputs::{ChannelLayer, MemoryOutput};
//! use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
//!
//! let registry = ChannelRegistry::with_standard_channels();
//! let recent = MemoryOutput::with_default_capacity("recent");
//! registry.attach_to_all(Arc::new(recent.clone()));
//!
//! tracing_subscriber::registry()
//!     .with(tracing_subscriber::fmt::layer())
//!     .with(ChannelLayer::new(registry.get(CORE).unwrap()))
//!     .init();
//! ```

mod layer;
mod memory;
mod record;
mod tracing_output;

pub use layer::ChannelLayer;
pub use memory::{MemoryOutput, DEFAULT_CAPACITY};
pub use record::LogRecord;
pub use tracing_output::{TracingOutput, TRACING_TARGET};
