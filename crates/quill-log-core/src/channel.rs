// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Named log channels.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, error, warn};

use crate::context::Context;
use crate::error::{LogError, LogResult, OutputError, OutputFailure};
use crate::output::{same_output, LogOutput, LogSource};
use crate::severity::Severity;

#[derive(Debug, Clone, Default)]
struct ChannelState {
	prefix: String,
	indent: usize,
}

/// A named logging endpoint with its own prefix, indent depth and outputs.
///
/// Every write snapshots `(prefix, indent)` under the channel lock and then
/// fans the message out to each attached output in attachment order. Writes
/// on one channel are serialized, so every output sees them in the same
/// order. A failing output never stops the remaining outputs from receiving
/// the message; failures are collected into [`LogError::OutputsFailed`].
pub struct LogChannel {
	name: String,
	state: Mutex<ChannelState>,
	outputs: RwLock<Vec<Arc<dyn LogOutput>>>,
	/// Held for a whole fan-out. Never taken by prefix or indent changes.
	write_lock: Mutex<()>,
}

impl LogChannel {
	/// Create a channel with no prefix, depth zero and no outputs.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			state: Mutex::new(ChannelState::default()),
			outputs: RwLock::new(Vec::new()),
			write_lock: Mutex::new(()),
		}
	}

	/// Get the channel name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Get the current prefix.
	pub fn prefix(&self) -> String {
		self.state.lock().prefix.clone()
	}

	/// Replace the prefix used by all subsequent writes.
	pub fn set_prefix(&self, prefix: impl Into<String>) {
		self.state.lock().prefix = prefix.into();
	}

	/// Get the current indent depth.
	pub fn indent_depth(&self) -> usize {
		self.state.lock().indent
	}

	/// Indent subsequent messages by one level until the guard is dropped.
	pub fn indent(&self) -> IndentGuard<'_> {
		self.push_indent();
		IndentGuard { channel: self }
	}

	/// Increase the indent depth, returning the new depth.
	///
	/// Prefer [`LogChannel::indent`], which releases the level on every exit path.
	pub fn push_indent(&self) -> usize {
		let mut state = self.state.lock();
		state.indent += 1;
		state.indent
	}

	/// Decrease the indent depth, returning the new depth.
	///
	/// Popping at depth zero leaves the depth at zero and reports
	/// [`LogError::IndentUnderflow`].
	pub fn pop_indent(&self) -> LogResult<usize> {
		let mut state = self.state.lock();
		if state.indent == 0 {
			drop(state);
			error!(channel = %self.name, "indent popped more times than pushed");
			return Err(LogError::IndentUnderflow {
				channel: self.name.clone(),
			});
		}
		state.indent -= 1;
		Ok(state.indent)
	}

	/// Attach an output. Attaching an output that is already attached is a
	/// no-op and returns `false`.
	pub fn attach(&self, output: Arc<dyn LogOutput>) -> bool {
		let mut outputs = self.outputs.write();
		if outputs.iter().any(|o| same_output(o, &output)) {
			return false;
		}
		debug!(channel = %self.name, output = output.name(), "attached log output");
		outputs.push(output);
		true
	}

	/// Detach an output, returning whether it was attached.
	pub fn detach(&self, output: &Arc<dyn LogOutput>) -> bool {
		let mut outputs = self.outputs.write();
		let before = outputs.len();
		outputs.retain(|o| !same_output(o, output));
		let removed = outputs.len() != before;
		if removed {
			debug!(channel = %self.name, output = output.name(), "detached log output");
		}
		removed
	}

	/// The attached outputs, in attachment order.
	pub fn outputs(&self) -> Vec<Arc<dyn LogOutput>> {
		self.outputs.read().clone()
	}

	/// Get the number of attached outputs.
	pub fn output_count(&self) -> usize {
		self.outputs.read().len()
	}

	/// Write a message to every attached output.
	///
	/// Concurrent writes on this channel fan out one at a time. Outputs shared
	/// with other channels still serialize their own streams. An output must
	/// not write back into the channel that is calling it.
	pub fn write(&self, severity: Severity, message: &str, context: Context<'_>) -> LogResult<()> {
		let _fan_out = self.write_lock.lock();
		let snapshot = self.state.lock().clone();
		let outputs = self.outputs();
		let source = LogSource {
			channel: &self.name,
			prefix: &snapshot.prefix,
			indent: snapshot.indent,
		};

		let mut failures = Vec::new();
		for (index, output) in outputs.iter().enumerate() {
			let result = panic::catch_unwind(AssertUnwindSafe(|| {
				output.write(&source, severity, message, context)
			}))
			.unwrap_or_else(|payload| Err(OutputError::Panicked(panic_message(payload))));

			if let Err(error) = result {
				warn!(
					channel = %self.name,
					output = output.name(),
					error = %error,
					"log output failed"
				);
				failures.push(OutputFailure {
					output: output.name().to_string(),
					index,
					error,
				});
			}
		}

		if failures.is_empty() {
			Ok(())
		} else {
			Err(LogError::OutputsFailed {
				failures,
				attempted: outputs.len(),
			})
		}
	}

	/// Write a plain message.
	pub fn info(&self, message: impl AsRef<str>) -> LogResult<()> {
		self.write(Severity::Message, message.as_ref(), Context::none())
	}

	/// Write a warning.
	pub fn warn(&self, message: impl AsRef<str>) -> LogResult<()> {
		self.write(Severity::Warning, message.as_ref(), Context::none())
	}

	/// Write an error.
	pub fn error(&self, message: impl AsRef<str>) -> LogResult<()> {
		self.write(Severity::Error, message.as_ref(), Context::none())
	}

	/// Write an error and its chain of sources as one multi-line error message.
	pub fn write_error(&self, err: &(dyn std::error::Error + 'static)) -> LogResult<()> {
		let mut message = err.to_string();
		let mut source = err.source();
		while let Some(cause) = source {
			message.push_str("\ncaused by: ");
			message.push_str(&cause.to_string());
			source = cause.source();
		}
		self.write(Severity::Error, &message, Context::none())
	}
}

impl fmt::Debug for LogChannel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let state = self.state.lock();
		f.debug_struct("LogChannel")
			.field("name", &self.name)
			.field("prefix", &state.prefix)
			.field("indent", &state.indent)
			.field("outputs", &self.output_count())
			.finish()
	}
}

/// Releases one indent level of its channel when dropped.
#[must_use = "the indent level is released as soon as the guard is dropped"]
pub struct IndentGuard<'a> {
	channel: &'a LogChannel,
}

impl Drop for IndentGuard<'_> {
	fn drop(&mut self) {
		// Underflow here means someone popped this level by hand; already reported.
		let _ = self.channel.pop_indent();
	}
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
	if let Some(s) = payload.downcast_ref::<&str>() {
		(*s).to_string()
	} else if let Some(s) = payload.downcast_ref::<String>() {
		s.clone()
	} else {
		"unknown panic".to_string()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[derive(Default)]
	struct Lines {
		lines: Mutex<Vec<String>>,
	}

	impl LogOutput for Lines {
		fn name(&self) -> &str {
			"lines"
		}

		fn write(
			&self,
			source: &LogSource<'_>,
			severity: Severity,
			message: &str,
			_context: Context<'_>,
		) -> Result<(), OutputError> {
			self.lines.lock().extend(source.render(severity, message));
			Ok(())
		}
	}

	fn channel_with_lines() -> (LogChannel, Arc<Lines>) {
		let channel = LogChannel::new("Core");
		let lines = Arc::new(Lines::default());
		channel.attach(lines.clone());
		(channel, lines)
	}

	#[test]
	fn test_write_uses_prefix_and_indent() {
		let (channel, lines) = channel_with_lines();
		channel.set_prefix("[Core] ");
		channel.info("loading").unwrap();
		{
			let _scope = channel.indent();
			channel.warn("slow asset\nretrying").unwrap();
		}
		channel.info("done").unwrap();

		assert_eq!(
			*lines.lines.lock(),
			vec![
				"[Core] Info:    loading",
				"[Core] Warning:     slow asset",
				"                    retrying",
				"[Core] Info:    done",
			]
		);
	}

	#[test]
	fn test_guard_releases_on_early_return() {
		fn load(channel: &LogChannel, fail: bool) -> Result<(), String> {
			let _scope = channel.indent();
			if fail {
				return Err("missing file".to_string());
			}
			Ok(())
		}

		let channel = LogChannel::new("Core");
		assert!(load(&channel, true).is_err());
		assert_eq!(channel.indent_depth(), 0);
		assert!(load(&channel, false).is_ok());
		assert_eq!(channel.indent_depth(), 0);
	}

	#[test]
	fn test_guard_releases_on_panic() {
		let channel = LogChannel::new("Core");
		let result = panic::catch_unwind(AssertUnwindSafe(|| {
			let _scope = channel.indent();
			panic!("boom");
		}));
		assert!(result.is_err());
		assert_eq!(channel.indent_depth(), 0);
	}

	#[test]
	fn test_pop_below_zero_clamps_and_reports() {
		let channel = LogChannel::new("Editor");
		let result = channel.pop_indent();
		assert!(matches!(
			result,
			Err(LogError::IndentUnderflow { ref channel }) if channel == "Editor"
		));
		assert_eq!(channel.indent_depth(), 0);
		assert_eq!(channel.push_indent(), 1);
	}

	#[test]
	fn test_attach_is_idempotent() {
		let (channel, lines) = channel_with_lines();
		assert!(!channel.attach(lines.clone()));
		assert_eq!(channel.output_count(), 1);

		channel.info("once").unwrap();
		assert_eq!(lines.lines.lock().len(), 1);
	}

	#[test]
	fn test_detach() {
		let (channel, lines) = channel_with_lines();
		let handle: Arc<dyn LogOutput> = lines.clone();
		assert!(channel.detach(&handle));
		assert!(!channel.detach(&handle));

		channel.info("dropped").unwrap();
		assert!(lines.lines.lock().is_empty());
	}

	#[test]
	fn test_write_without_outputs_is_ok() {
		let channel = LogChannel::new("Game");
		assert!(channel.error("nobody listens").is_ok());
	}

	#[test]
	fn test_prefix_change_is_not_retroactive() {
		let (channel, lines) = channel_with_lines();
		channel.info("before").unwrap();
		channel.set_prefix("P ");
		channel.info("after").unwrap();
		assert_eq!(
			*lines.lines.lock(),
			vec!["Info:    before", "P Info:    after"]
		);
		assert_eq!(channel.prefix(), "P ");
	}

	#[test]
	fn test_write_error_includes_sources() {
		#[derive(Debug, thiserror::Error)]
		#[error("failed to load level")]
		struct LoadError {
			#[source]
			source: std::io::Error,
		}

		let (channel, lines) = channel_with_lines();
		let err = LoadError {
			source: std::io::Error::new(std::io::ErrorKind::NotFound, "level.toml missing"),
		};
		channel.write_error(&err).unwrap();

		assert_eq!(
			*lines.lines.lock(),
			vec![
				"ERROR:   failed to load level",
				"         caused by: level.toml missing",
			]
		);
	}

	#[test]
	fn test_panicking_output_is_isolated() {
		struct Panics;

		impl LogOutput for Panics {
			fn name(&self) -> &str {
				"panics"
			}

			fn write(
				&self,
				_source: &LogSource<'_>,
				_severity: Severity,
				_message: &str,
				_context: Context<'_>,
			) -> Result<(), OutputError> {
				panic!("widget disposed");
			}
		}

		let channel = LogChannel::new("Core");
		channel.attach(Arc::new(Panics));
		let lines = Arc::new(Lines::default());
		channel.attach(lines.clone());

		let err = channel.info("still delivered").unwrap_err();
		let failures = err.failures();
		assert_eq!(failures.len(), 1);
		assert_eq!(failures[0].output, "panics");
		assert_eq!(failures[0].index, 0);
		assert!(matches!(
			failures[0].error,
			OutputError::Panicked(ref msg) if msg == "widget disposed"
		));
		assert_eq!(lines.lines.lock().len(), 1);
	}

	proptest! {
		/// Any balanced sequence of nested guards returns the depth to where it started.
		#[test]
		fn nested_guards_restore_depth(start in 0usize..4, nesting in 0usize..12) {
			let channel = LogChannel::new("Core");
			for _ in 0..start {
				channel.push_indent();
			}
			{
				let mut guards = Vec::new();
				for level in 0..nesting {
					guards.push(channel.indent());
					prop_assert_eq!(channel.indent_depth(), start + level + 1);
				}
				while guards.pop().is_some() {}
			}
			prop_assert_eq!(channel.indent_depth(), start);
		}

		/// Extra pops never drive the depth negative.
		#[test]
		fn extra_pops_clamp_at_zero(pushes in 0usize..5, pops in 0usize..10) {
			let channel = LogChannel::new("Core");
			for _ in 0..pushes {
				channel.push_indent();
			}
			for _ in 0..pops {
				let _ = channel.pop_indent();
			}
			prop_assert_eq!(channel.indent_depth(), pushes.saturating_sub(pops));
		}
	}
}
