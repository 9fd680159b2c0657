// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Tracing layer that writes events into a log channel.

use std::fmt;
use std::sync::Arc;

use quill_log_core::{Context as LogContext, LogChannel, Severity};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

/// Events whose target starts with this are never forwarded. It covers
/// [`TracingOutput`](crate::TracingOutput) and the channel's own diagnostics,
/// so pairing the two cannot loop.
const SKIPPED_TARGET_PREFIX: &str = "quill_log";

/// A tracing Layer that writes every event into a [`LogChannel`].
///
/// ERROR events become [`Severity::Error`], WARN events [`Severity::Warning`]
/// and everything else [`Severity::Message`]. Event fields are appended to the
/// message as `key=value` pairs.
#[derive(Clone)]
pub struct ChannelLayer {
	channel: Arc<LogChannel>,
}

impl ChannelLayer {
	/// Route events into `channel`.
	pub fn new(channel: Arc<LogChannel>) -> Self {
		Self { channel }
	}
}

impl<S> Layer<S> for ChannelLayer
where
	S: Subscriber + for<'a> LookupSpan<'a>,
{
	fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
		let metadata = event.metadata();
		if metadata.target().starts_with(SKIPPED_TARGET_PREFIX) {
			return;
		}
		let severity = Severity::from_tracing(metadata.level());

		let mut visitor = FieldVisitor::new();
		event.record(&mut visitor);
		let message = visitor.into_message();

		// Failures were already reported by the channel; a layer has nowhere to return them.
		let _ = self.channel.write(severity, &message, LogContext::none());
	}
}

/// Visitor that flattens an event into a single message string.
struct FieldVisitor {
	message: Option<String>,
	fields: Vec<(String, String)>,
}

impl FieldVisitor {
	fn new() -> Self {
		Self {
			message: None,
			fields: Vec::new(),
		}
	}

	fn into_message(self) -> String {
		let mut message = self.message.unwrap_or_default();
		for (name, value) in self.fields {
			if !message.is_empty() {
				message.push(' ');
			}
			message.push_str(&name);
			message.push('=');
			message.push_str(&value);
		}
		message
	}

	fn push(&mut self, field: &Field, value: String) {
		if field.name() == "message" {
			self.message = Some(value);
		} else {
			self.fields.push((field.name().to_string(), value));
		}
	}
}

impl Visit for FieldVisitor {
	fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
		self.push(field, format!("{:?}", value));
	}

	fn record_str(&mut self, field: &Field, value: &str) {
		self.push(field, value.to_string());
	}

	fn record_i64(&mut self, field: &Field, value: i64) {
		self.push(field, value.to_string());
	}

	fn record_u64(&mut self, field: &Field, value: u64) {
		self.push(field, value.to_string());
	}

	fn record_bool(&mut self, field: &Field, value: bool) {
		self.push(field, value.to_string());
	}

	fn record_f64(&mut self, field: &Field, value: f64) {
		self.push(field, value.to_string());
	}

	fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
		self.push(field, value.to_string());
	}
}
