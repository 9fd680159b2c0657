// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The output capability every log destination implements.

use std::sync::Arc;

use crate::context::Context;
use crate::error::OutputError;
use crate::render::render_lines;
use crate::severity::Severity;

/// Identity of the channel a message came from, with the prefix and indent
/// captured when the write was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogSource<'a> {
	pub channel: &'a str,
	pub prefix: &'a str,
	pub indent: usize,
}

impl LogSource<'_> {
	/// Render a message the way a text output would for this source.
	pub fn render(&self, severity: Severity, message: &str) -> Vec<String> {
		render_lines(self.prefix, self.indent, severity, message)
	}
}

/// A destination that can render one log message.
///
/// Outputs may be attached to several channels at once and are called from
/// whichever thread issued the write, so implementations serialize access to
/// their own destination.
pub trait LogOutput: Send + Sync {
	/// Name used when reporting failures.
	fn name(&self) -> &str {
		std::any::type_name::<Self>()
	}

	fn write(
		&self,
		source: &LogSource<'_>,
		severity: Severity,
		message: &str,
		context: Context<'_>,
	) -> Result<(), OutputError>;
}

/// Whether two output handles refer to the same output instance.
pub fn same_output(a: &Arc<dyn LogOutput>, b: &Arc<dyn LogOutput>) -> bool {
	Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
}

/// Drops messages below a minimum severity before they reach the wrapped output.
pub struct FilteredOutput {
	inner: Arc<dyn LogOutput>,
	min_severity: Severity,
}

impl FilteredOutput {
	/// Forward only messages at or above `min_severity` to `inner`.
	pub fn new(inner: Arc<dyn LogOutput>, min_severity: Severity) -> Self {
		Self {
			inner,
			min_severity,
		}
	}
}

impl LogOutput for FilteredOutput {
	fn name(&self) -> &str {
		self.inner.name()
	}

	fn write(
		&self,
		source: &LogSource<'_>,
		severity: Severity,
		message: &str,
		context: Context<'_>,
	) -> Result<(), OutputError> {
		if severity < self.min_severity {
			return Ok(());
		}
		self.inner.write(source, severity, message, context)
	}
}
