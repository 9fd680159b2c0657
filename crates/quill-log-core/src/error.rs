// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use thiserror::Error;

/// Result type alias for channel and registry operations.
pub type LogResult<T> = Result<T, LogError>;

/// Errors surfaced by channels and the channel registry.
#[derive(Error, Debug)]
pub enum LogError {
	#[error("{} of {attempted} log outputs failed: {}", .failures.len(), summarize(.failures))]
	OutputsFailed {
		failures: Vec<OutputFailure>,
		attempted: usize,
	},

	#[error("Indent popped below zero on channel {channel}")]
	IndentUnderflow { channel: String },

	#[error("Channel already registered: {0}")]
	DuplicateChannel(String),
}

impl LogError {
	/// Failures collected during fan-out, if this is an output error.
	pub fn failures(&self) -> &[OutputFailure] {
		match self {
			LogError::OutputsFailed { failures, .. } => failures,
			_ => &[],
		}
	}
}

/// Errors a single output can report while rendering a message.
#[derive(Error, Debug)]
pub enum OutputError {
	#[error("Output is closed")]
	Closed,

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Output panicked: {0}")]
	Panicked(String),

	#[error("Output rejected message: {0}")]
	Rejected(String),
}

/// One output that failed during a channel write.
#[derive(Debug)]
pub struct OutputFailure {
	/// Name of the failing output.
	pub output: String,
	/// Position of the output in the channel's attachment order.
	pub index: usize,
	pub error: OutputError,
}

fn summarize(failures: &[OutputFailure]) -> String {
	failures
		.iter()
		.map(|f| format!("{} ({})", f.output, f.error))
		.collect::<Vec<_>>()
		.join(", ")
}
