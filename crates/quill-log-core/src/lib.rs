// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core logging engine for Quill.
//!
//! This crate provides:
//! - [`Severity`] - The closed set of message classes and their fixed-width tags
//! - [`LogOutput`] - The capability every destination implements
//! - [`TextWriterOutput`] - An output rendering text lines into any `io::Write`
//! - [`LogChannel`] - A named endpoint with a prefix, a scoped indent depth and attached outputs
//! - [`ChannelRegistry`] - The explicitly constructed set of channels a process logs through
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use quill_log_core::{ChannelRegistry, TextWriterOutput, CORE};
//!
//! let registry = ChannelRegistry::with_standard_channels();
//! registry.attach_to_all(Arc::new(TextWriterOutput::stdout("console")));
//!
//! let core = registry.get(CORE).unwrap();
//! core.info("Loading plugins")?;
//! {
//!     let _scope = core.indent();
//!     core.warn("Plugin 'tilemaps' is outdated\nUsing compatibility mode")?;
//! }
//! ```
//!
//! Renders:
//!
//! ```text
//! Info:    Loading plugins
//! Warning:     Plugin 'tilemaps' is outdated
//!              Using compatibility mode
//! ```

mod channel;
mod context;
mod error;
mod output;
mod registry;
mod render;
mod severity;
mod text;

pub use channel::{IndentGuard, LogChannel};
pub use context::Context;
pub use error::{LogError, LogResult, OutputError, OutputFailure};
pub use output::{same_output, FilteredOutput, LogOutput, LogSource};
pub use registry::{ChannelRegistry, CORE, EDITOR, GAME};
pub use render::{render_lines, split_lines, INDENT_WIDTH, LINE_TERMINATORS};
pub use severity::{Severity, TAG_WIDTH};
pub use text::TextWriterOutput;
