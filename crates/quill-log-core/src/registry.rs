// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The set of named channels an application logs through.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::channel::LogChannel;
use crate::error::{LogError, LogResult};
use crate::output::LogOutput;

/// Channel for engine-level messages.
pub const CORE: &str = "Core";
/// Channel for editor messages.
pub const EDITOR: &str = "Editor";
/// Channel for game/runtime messages.
pub const GAME: &str = "Game";

/// A registry of named channels.
///
/// Built once at startup and handed to the subsystems that need it. Cloning
/// is cheap and every clone sees the same channels.
#[derive(Clone, Default)]
pub struct ChannelRegistry {
	inner: Arc<RwLock<Vec<Arc<LogChannel>>>>,
}

impl ChannelRegistry {
	/// Create an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// A registry holding the `Core`, `Editor` and `Game` channels.
	pub fn with_standard_channels() -> Self {
		let registry = Self::new();
		{
			let mut channels = registry.inner.write();
			for name in [CORE, EDITOR, GAME] {
				channels.push(Arc::new(LogChannel::new(name)));
			}
		}
		registry
	}

	/// Register a new channel. Names are unique.
	pub fn register(&self, name: impl Into<String>) -> LogResult<Arc<LogChannel>> {
		let name = name.into();
		let mut channels = self.inner.write();
		if channels.iter().any(|c| c.name() == name) {
			return Err(LogError::DuplicateChannel(name));
		}

		debug!(channel = %name, "registered log channel");
		let channel = Arc::new(LogChannel::new(name));
		channels.push(channel.clone());
		Ok(channel)
	}

	/// Get a channel by name.
	pub fn get(&self, name: &str) -> Option<Arc<LogChannel>> {
		self.inner.read().iter().find(|c| c.name() == name).cloned()
	}

	/// Get a channel by name, registering it first if needed.
	pub fn get_or_register(&self, name: &str) -> Arc<LogChannel> {
		if let Some(channel) = self.get(name) {
			return channel;
		}

		let mut channels = self.inner.write();
		// Another thread may have registered it between the two locks.
		if let Some(channel) = channels.iter().find(|c| c.name() == name) {
			return channel.clone();
		}
		let channel = Arc::new(LogChannel::new(name));
		channels.push(channel.clone());
		channel
	}

	/// All channels, in registration order.
	pub fn channels(&self) -> Vec<Arc<LogChannel>> {
		self.inner.read().clone()
	}

	/// Get the channel names in registration order.
	pub fn names(&self) -> Vec<String> {
		self.inner.read().iter().map(|c| c.name().to_string()).collect()
	}

	/// Attach an output to every registered channel.
	pub fn attach_to_all(&self, output: Arc<dyn LogOutput>) {
		for channel in self.inner.read().iter() {
			channel.attach(output.clone());
		}
	}

	/// Detach an output from every registered channel.
	pub fn detach_from_all(&self, output: &Arc<dyn LogOutput>) {
		for channel in self.inner.read().iter() {
			channel.detach(output);
		}
	}

	/// Get the number of registered channels.
	pub fn len(&self) -> usize {
		self.inner.read().len()
	}

	/// Check if no channels are registered.
	pub fn is_empty(&self) -> bool {
		self.inner.read().is_empty()
	}
}

impl std::fmt::Debug for ChannelRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ChannelRegistry")
			.field("channels", &self.names())
			.finish()
	}
}
