// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration and startup wiring for Quill log channels.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Validation of channel/output references
//! - [`LoggingSetup`], which builds the channel registry and its outputs once at startup
//! - [`LoggingSetup::init_tracing`], which installs the process `tracing` subscriber
//!
//! # Usage
//!
//! ```ignore
//! use quill_log_config::{load_config, LoggingSetup};
//!
//! let config = load_config()?;
//! let logging = LoggingSetup::build(&config)?;
//! logging.init_tracing(&config.tracing)?;
//!
//! let core = logging.channel("Core").unwrap();
//! core.info("Engine started")?;
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod setup;
pub mod sources;

pub use error::ConfigError;
pub use layer::LoggingConfigLayer;
pub use sections::*;
pub use setup::LoggingSetup;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use std::collections::HashSet;

use tracing::{debug, info};

/// Config file read by [`load_config`], relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "quill.toml";

/// Fully resolved logging configuration.
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
	pub tracing: TracingConfig,
	/// Channels in registration order.
	pub channels: Vec<ChannelConfig>,
	/// Outputs, ordered by name.
	pub outputs: Vec<OutputConfig>,
}

impl LoggingConfig {
	/// Get an output by name.
	pub fn output(&self, name: &str) -> Option<&OutputConfig> {
		self.outputs.iter().find(|o| o.name == name)
	}

	/// Get a channel by name.
	pub fn channel(&self, name: &str) -> Option<&ChannelConfig> {
		self.channels.iter().find(|c| c.name == name)
	}
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`QUILL_LOG_*`)
/// 2. Config file (`./quill.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<LoggingConfig, ConfigError> {
	load_config_with_file(DEFAULT_CONFIG_PATH)
}

/// Load configuration from defaults and environment only.
pub fn load_config_from_env() -> Result<LoggingConfig, ConfigError> {
	load_from_sources(vec![Box::new(DefaultsSource), Box::new(EnvSource)])
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<LoggingConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

/// Merge the given sources in precedence order and resolve the result.
pub fn load_from_sources(
	mut sources: Vec<Box<dyn ConfigSource>>,
) -> Result<LoggingConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = LoggingConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize a merged configuration layer into resolved config.
pub fn finalize(layer: LoggingConfigLayer) -> Result<LoggingConfig, ConfigError> {
	let tracing = layer.tracing.unwrap_or_default().finalize();
	let channels: Vec<ChannelConfig> = layer
		.channels
		.unwrap_or_default()
		.into_iter()
		.map(ChannelConfigLayer::finalize)
		.collect();
	let outputs = layer
		.outputs
		.unwrap_or_default()
		.into_iter()
		.map(|(name, output)| output.finalize(&name))
		.collect::<Result<Vec<_>, _>>()?;

	let config = LoggingConfig {
		tracing,
		channels,
		outputs,
	};
	validate_config(&config)?;

	info!(
		channels = config.channels.len(),
		outputs = config.outputs.iter().filter(|o| o.enabled).count(),
		tracing_format = ?config.tracing.format,
		"Logging configuration loaded"
	);

	Ok(config)
}

/// Validate cross-section configuration rules.
fn validate_config(config: &LoggingConfig) -> Result<(), ConfigError> {
	let mut seen = HashSet::new();
	for channel in &config.channels {
		if channel.name.trim().is_empty() {
			return Err(ConfigError::Validation(
				"channel names must not be empty".to_string(),
			));
		}
		if !seen.insert(channel.name.as_str()) {
			return Err(ConfigError::Validation(format!(
				"channel '{}' is configured more than once",
				channel.name
			)));
		}
		for output in channel.outputs.iter().flatten() {
			if config.output(output).is_none() {
				return Err(ConfigError::Validation(format!(
					"channel '{}' references unknown output '{}'",
					channel.name, output
				)));
			}
		}
	}

	if let Some(name) = &config.tracing.channel {
		if config.channel(name).is_none() {
			return Err(ConfigError::Validation(format!(
				"tracing.channel references unknown channel '{name}'"
			)));
		}
	}

	Ok(())
}
