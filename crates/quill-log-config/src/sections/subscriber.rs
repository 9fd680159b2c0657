// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration of the process `tracing` subscriber.

use serde::{Deserialize, Serialize};

fn default_level() -> String {
	"info".to_string()
}

/// Output style of the `tracing` fmt layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TracingFormat {
	#[default]
	Pretty,
	Compact,
	Json,
}

impl std::str::FromStr for TracingFormat {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"pretty" => Ok(TracingFormat::Pretty),
			"compact" => Ok(TracingFormat::Compact),
			"json" => Ok(TracingFormat::Json),
			other => Err(format!("unknown tracing format '{other}'")),
		}
	}
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TracingConfigLayer {
	pub level: Option<String>,
	pub format: Option<TracingFormat>,
	/// Channel that receives every `tracing` event.
	pub channel: Option<String>,
}

impl TracingConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.level.is_some() {
			self.level = other.level;
		}
		if other.format.is_some() {
			self.format = other.format;
		}
		if other.channel.is_some() {
			self.channel = other.channel;
		}
	}

	pub fn finalize(self) -> TracingConfig {
		TracingConfig {
			level: self.level.unwrap_or_else(default_level),
			format: self.format.unwrap_or_default(),
			channel: self.channel.filter(|c| !c.is_empty()),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TracingConfig {
	/// `EnvFilter` directive used when `RUST_LOG` is unset.
	pub level: String,
	pub format: TracingFormat,
	pub channel: Option<String>,
}

impl Default for TracingConfig {
	fn default() -> Self {
		Self {
			level: default_level(),
			format: TracingFormat::default(),
			channel: None,
		}
	}
}
