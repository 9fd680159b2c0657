// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Output that forwards channel messages to `tracing`.

use quill_log_core::{Context, LogOutput, LogSource, OutputError, Severity};

/// Target of every event emitted by [`TracingOutput`].
pub const TRACING_TARGET: &str = "quill_log";

/// An output that re-emits each message as a `tracing` event.
///
/// The event message is the rendered text (lines joined with `\n`), so it
/// keeps the channel's prefix and indentation. Empty messages emit nothing.
#[derive(Debug, Clone, Default)]
pub struct TracingOutput;

impl TracingOutput {
	pub fn new() -> Self {
		Self
	}
}

impl LogOutput for TracingOutput {
	fn name(&self) -> &str {
		"tracing"
	}

	fn write(
		&self,
		source: &LogSource<'_>,
		severity: Severity,
		message: &str,
		_context: Context<'_>,
	) -> Result<(), OutputError> {
		let lines = source.render(severity, message);
		if lines.is_empty() {
			return Ok(());
		}
		let text = lines.join("\n");

		match severity {
			Severity::Message => tracing::info!(
				target: TRACING_TARGET,
				channel = source.channel,
				indent = source.indent,
				"{text}"
			),
			Severity::Warning => tracing::warn!(
				target: TRACING_TARGET,
				channel = source.channel,
				indent = source.indent,
				"{text}"
			),
			Severity::Error => tracing::error!(
				target: TRACING_TARGET,
				channel = source.channel,
				indent = source.indent,
				"{text}"
			),
		}
		Ok(())
	}
}
