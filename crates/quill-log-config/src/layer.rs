// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration layer for merging from multiple sources.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::sections::{
	default_outputs, merge_channels, merge_outputs, standard_channels, ChannelConfigLayer,
	OutputConfigLayer, TracingConfigLayer,
};

/// Logging configuration layer - all fields are optional for merging.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfigLayer {
	#[serde(default)]
	pub tracing: Option<TracingConfigLayer>,
	#[serde(default)]
	pub channels: Option<Vec<ChannelConfigLayer>>,
	#[serde(default)]
	pub outputs: Option<BTreeMap<String, OutputConfigLayer>>,
}

impl LoggingConfigLayer {
	/// Built-in defaults: the standard channels writing to a stdout console.
	pub fn defaults() -> Self {
		Self {
			tracing: Some(TracingConfigLayer::default()),
			channels: Some(standard_channels()),
			outputs: Some(default_outputs()),
		}
	}

	/// Merge another layer into this one. Other layer takes precedence.
	pub fn merge(&mut self, other: LoggingConfigLayer) {
		merge_option(&mut self.tracing, other.tracing, TracingConfigLayer::merge);
		merge_option(&mut self.channels, other.channels, merge_channels);
		merge_option(&mut self.outputs, other.outputs, merge_outputs);
	}
}

fn merge_option<T, F>(target: &mut Option<T>, source: Option<T>, merge_fn: F)
where
	F: FnOnce(&mut T, T),
{
	match (target.as_mut(), source) {
		(Some(t), Some(s)) => merge_fn(t, s),
		(None, Some(s)) => *target = Some(s),
		_ => {}
	}
}
