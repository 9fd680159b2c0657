// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Output configuration section.

use std::collections::BTreeMap;
use std::path::PathBuf;

use quill_log_core::Severity;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Name of the default console output.
pub const CONSOLE_OUTPUT: &str = "console";
/// Name of the file output added by `QUILL_LOG_FILE`.
pub const FILE_OUTPUT: &str = "file";

const DEFAULT_MEMORY_CAPACITY: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
	Stdout,
	Stderr,
	File,
	Memory,
	Tracing,
}

/// Where an output writes (runtime, fully resolved).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
	Stdout,
	Stderr,
	File { path: PathBuf, append: bool },
	Memory { capacity: usize },
	Tracing,
}

/// One output (runtime, fully resolved).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
	pub name: String,
	pub enabled: bool,
	pub target: OutputTarget,
	pub min_severity: Severity,
}

/// One output layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct OutputConfigLayer {
	#[serde(default)]
	pub kind: Option<OutputKind>,
	#[serde(default)]
	pub enabled: Option<bool>,
	#[serde(default)]
	pub path: Option<PathBuf>,
	#[serde(default)]
	pub append: Option<bool>,
	#[serde(default)]
	pub capacity: Option<usize>,
	#[serde(default)]
	pub min_severity: Option<Severity>,
}

impl OutputConfigLayer {
	pub fn of_kind(kind: OutputKind) -> Self {
		Self {
			kind: Some(kind),
			..Default::default()
		}
	}

	pub fn merge(&mut self, other: OutputConfigLayer) {
		if other.kind.is_some() {
			self.kind = other.kind;
		}
		if other.enabled.is_some() {
			self.enabled = other.enabled;
		}
		if other.path.is_some() {
			self.path = other.path;
		}
		if other.append.is_some() {
			self.append = other.append;
		}
		if other.capacity.is_some() {
			self.capacity = other.capacity;
		}
		if other.min_severity.is_some() {
			self.min_severity = other.min_severity;
		}
	}

	pub fn finalize(self, name: &str) -> Result<OutputConfig, ConfigError> {
		let key = format!("outputs.{name}");
		let kind = self.kind.ok_or_else(|| ConfigError::InvalidValue {
			key: key.clone(),
			message: "missing output kind".to_string(),
		})?;

		let target = match kind {
			OutputKind::Stdout => OutputTarget::Stdout,
			OutputKind::Stderr => OutputTarget::Stderr,
			OutputKind::Tracing => OutputTarget::Tracing,
			OutputKind::File => OutputTarget::File {
				path: self.path.ok_or_else(|| ConfigError::InvalidValue {
					key: key.clone(),
					message: "file output requires a path".to_string(),
				})?,
				append: self.append.unwrap_or(true),
			},
			OutputKind::Memory => {
				let capacity = self.capacity.unwrap_or(DEFAULT_MEMORY_CAPACITY);
				if capacity == 0 {
					return Err(ConfigError::InvalidValue {
						key,
						message: "memory output capacity must be greater than zero".to_string(),
					});
				}
				OutputTarget::Memory { capacity }
			}
		};

		Ok(OutputConfig {
			name: name.to_string(),
			enabled: self.enabled.unwrap_or(true),
			target,
			min_severity: self.min_severity.unwrap_or(Severity::Message),
		})
	}
}

/// The single stdout console output.
pub fn default_outputs() -> BTreeMap<String, OutputConfigLayer> {
	BTreeMap::from([(
		CONSOLE_OUTPUT.to_string(),
		OutputConfigLayer::of_kind(OutputKind::Stdout),
	)])
}

/// Merge `other` into `base`: same-named outputs merge, new ones are added.
pub fn merge_outputs(
	base: &mut BTreeMap<String, OutputConfigLayer>,
	other: BTreeMap<String, OutputConfigLayer>,
) {
	for (name, output) in other {
		match base.get_mut(&name) {
			Some(existing) => existing.merge(output),
			None => {
				base.insert(name, output);
			}
		}
	}
}
