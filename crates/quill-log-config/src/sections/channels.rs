// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Channel configuration section.

use quill_log_core::{CORE, EDITOR, GAME};
use serde::Deserialize;

/// One channel (runtime, fully resolved).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelConfig {
	pub name: String,
	pub prefix: String,
	/// Outputs to attach, in order. `None` attaches every enabled output.
	pub outputs: Option<Vec<String>>,
}

/// One channel layer (partial, for merging). Layers merge by name.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ChannelConfigLayer {
	pub name: String,
	#[serde(default)]
	pub prefix: Option<String>,
	#[serde(default)]
	pub outputs: Option<Vec<String>>,
}

impl ChannelConfigLayer {
	pub fn named(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Default::default()
		}
	}

	pub fn merge(&mut self, other: ChannelConfigLayer) {
		if other.prefix.is_some() {
			self.prefix = other.prefix;
		}
		if other.outputs.is_some() {
			self.outputs = other.outputs;
		}
	}

	pub fn finalize(self) -> ChannelConfig {
		ChannelConfig {
			name: self.name,
			prefix: self.prefix.unwrap_or_default(),
			outputs: self.outputs,
		}
	}
}

/// The `Core`, `Editor` and `Game` channels with no prefix.
pub fn standard_channels() -> Vec<ChannelConfigLayer> {
	[CORE, EDITOR, GAME]
		.into_iter()
		.map(ChannelConfigLayer::named)
		.collect()
}

/// Merge `other` into `base`: same-named channels merge, new ones are appended.
pub fn merge_channels(base: &mut Vec<ChannelConfigLayer>, other: Vec<ChannelConfigLayer>) {
	for channel in other {
		match base.iter_mut().find(|c| c.name == channel.name) {
			Some(existing) => existing.merge(channel),
			None => base.push(channel),
		}
	}
}
