// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Captured log records.

use chrono::{DateTime, Utc};
use quill_log_core::{render_lines, LogSource, Severity};
use serde::{Deserialize, Serialize};

/// One message as it was written to a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
	/// Unique sequential ID within the output that captured it.
	pub id: u64,
	/// When the record was captured.
	pub timestamp: DateTime<Utc>,
	/// Name of the channel the message was written to.
	pub channel: String,
	pub severity: Severity,
	/// Channel prefix at the time of the write.
	#[serde(skip_serializing_if = "String::is_empty", default)]
	pub prefix: String,
	/// Channel indent depth at the time of the write.
	pub indent: usize,
	/// The raw message, before line splitting.
	pub message: String,
}

impl LogRecord {
	/// Capture one write as seen by an output.
	pub fn new(id: u64, source: &LogSource<'_>, severity: Severity, message: impl Into<String>) -> Self {
		Self {
			id,
			timestamp: Utc::now(),
			channel: source.channel.to_string(),
			severity,
			prefix: source.prefix.to_string(),
			indent: source.indent,
			message: message.into(),
		}
	}

	/// The lines a text output would have written for this record.
	pub fn render(&self) -> Vec<String> {
		render_lines(&self.prefix, self.indent, self.severity, &self.message)
	}
}
