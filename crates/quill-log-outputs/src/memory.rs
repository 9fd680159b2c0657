// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Thread-safe ring buffer output.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use quill_log_core::{Context, LogOutput, LogSource, OutputError, Severity};
use tokio::sync::broadcast;

use crate::record::LogRecord;

/// Default buffer capacity.
pub const DEFAULT_CAPACITY: usize = 10_000;

/// Capacity of the live subscription channel.
const BROADCAST_CAPACITY: usize = 1024;

/// An output that keeps the most recent records in memory.
///
/// When the buffer is full, the oldest record is evicted. New records are also
/// broadcast to live subscribers, e.g. a log panel in a UI.
#[derive(Clone)]
pub struct MemoryOutput {
	inner: Arc<MemoryOutputInner>,
}

struct MemoryOutputInner {
	name: String,
	state: Mutex<MemoryState>,
	capacity: usize,
	sender: broadcast::Sender<LogRecord>,
}

struct MemoryState {
	records: VecDeque<LogRecord>,
	/// Next record ID (monotonically increasing).
	next_id: u64,
}

impl MemoryOutput {
	/// Create a new memory output with the specified capacity (at least one).
	pub fn new(name: impl Into<String>, capacity: usize) -> Self {
		let capacity = capacity.max(1);
		let (sender, _) = broadcast::channel(BROADCAST_CAPACITY);
		Self {
			inner: Arc::new(MemoryOutputInner {
				name: name.into(),
				state: Mutex::new(MemoryState {
					records: VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY)),
					next_id: 1,
				}),
				capacity,
				sender,
			}),
		}
	}

	/// Create a memory output holding up to [`DEFAULT_CAPACITY`] records.
	pub fn with_default_capacity(name: impl Into<String>) -> Self {
		Self::new(name, DEFAULT_CAPACITY)
	}

	/// Up to `limit` of the most recent records, oldest first.
	pub fn recent(&self, limit: usize) -> Vec<LogRecord> {
		let state = self.inner.state.lock();
		let skip = state.records.len().saturating_sub(limit);
		state.records.iter().skip(skip).cloned().collect()
	}

	/// Every buffered record, oldest first.
	pub fn records(&self) -> Vec<LogRecord> {
		self.inner.state.lock().records.iter().cloned().collect()
	}

	/// Get the number of records held.
	pub fn len(&self) -> usize {
		self.inner.state.lock().records.len()
	}

	/// Check if no records are held.
	pub fn is_empty(&self) -> bool {
		self.inner.state.lock().records.is_empty()
	}

	/// Get the buffer capacity.
	pub fn capacity(&self) -> usize {
		self.inner.capacity
	}

	/// Subscribe to records as they are written.
	pub fn subscribe(&self) -> broadcast::Receiver<LogRecord> {
		self.inner.sender.subscribe()
	}

	/// Clear all buffered records. IDs keep increasing.
	pub fn clear(&self) {
		self.inner.state.lock().records.clear();
	}
}

impl LogOutput for MemoryOutput {
	fn name(&self) -> &str {
		&self.inner.name
	}

	fn write(
		&self,
		source: &LogSource<'_>,
		severity: Severity,
		message: &str,
		_context: Context<'_>,
	) -> Result<(), OutputError> {
		let record = {
			let mut state = self.inner.state.lock();
			let record = LogRecord::new(state.next_id, source, severity, message);
			state.next_id += 1;
			if state.records.len() >= self.inner.capacity {
				state.records.pop_front();
			}
			state.records.push_back(record.clone());
			record
		};

		// No subscribers is fine.
		let _ = self.inner.sender.send(record);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use quill_log_core::LogChannel;

	fn channel_with_memory(capacity: usize) -> (LogChannel, MemoryOutput) {
		let channel = LogChannel::new("Editor");
		let memory = MemoryOutput::new("recent", capacity);
		channel.attach(Arc::new(memory.clone()));
		(channel, memory)
	}

	#[test]
	fn test_write_and_read_back() {
		let (channel, memory) = channel_with_memory(100);

		channel.info("message 1").unwrap();
		{
			let _scope = channel.indent();
			channel.warn("message 2").unwrap();
		}

		let records = memory.records();
		assert_eq!(records.len(), 2);
		assert_eq!(records[0].message, "message 1");
		assert_eq!(records[0].indent, 0);
		assert_eq!(records[1].severity, Severity::Warning);
		assert_eq!(records[1].indent, 1);
		assert_eq!(records[1].channel, "Editor");
	}

	#[test]
	fn test_capacity_eviction() {
		let (channel, memory) = channel_with_memory(3);

		for i in 1..=4 {
			channel.info(format!("msg {i}")).unwrap();
		}

		assert_eq!(memory.len(), 3);
		let records = memory.records();
		assert_eq!(records[0].message, "msg 2");
		assert_eq!(records[2].message, "msg 4");
		assert_eq!(records[2].id, 4);
	}

	#[test]
	fn test_recent_limit() {
		let (channel, memory) = channel_with_memory(10);
		for i in 1..=5 {
			channel.info(format!("msg {i}")).unwrap();
		}

		let recent = memory.recent(2);
		assert_eq!(recent.len(), 2);
		assert_eq!(recent[0].message, "msg 4");
		assert_eq!(recent[1].message, "msg 5");
		assert_eq!(memory.recent(50).len(), 5);
	}

	#[test]
	fn test_clear_keeps_ids_increasing() {
		let (channel, memory) = channel_with_memory(10);
		channel.info("a").unwrap();
		memory.clear();
		assert!(memory.is_empty());

		channel.info("b").unwrap();
		assert_eq!(memory.records()[0].id, 2);
	}

	#[test]
	fn test_zero_capacity_is_raised_to_one() {
		let memory = MemoryOutput::new("tiny", 0);
		assert_eq!(memory.capacity(), 1);
	}

	#[tokio::test]
	async fn test_broadcast_subscription() {
		let (channel, memory) = channel_with_memory(100);
		let mut rx = memory.subscribe();

		channel.error("broadcast test").unwrap();

		let record = rx.recv().await.unwrap();
		assert_eq!(record.message, "broadcast test");
		assert_eq!(record.severity, Severity::Error);
	}

	proptest! {
		/// The buffer never exceeds its capacity and always holds the newest records.
		#[test]
		fn buffer_holds_newest_records(capacity in 1usize..20, writes in 0usize..60) {
			let (channel, memory) = channel_with_memory(capacity);
			for i in 0..writes {
				channel.info(format!("{i}")).unwrap();
			}

			let records = memory.records();
			prop_assert_eq!(records.len(), writes.min(capacity));
			if let Some(last) = records.last() {
				prop_assert_eq!(last.id, writes as u64);
			}
			for pair in records.windows(2) {
				prop_assert_eq!(pair[1].id, pair[0].id + 1);
			}
		}
	}
}
