// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Builds the channel registry and its outputs from resolved configuration.

use std::collections::BTreeMap;
use std::io;
use std::sync::Arc;

use quill_log_core::{
	ChannelRegistry, FilteredOutput, LogChannel, LogOutput, Severity, TextWriterOutput,
};
use quill_log_outputs::{ChannelLayer, MemoryOutput, TracingOutput};
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::ConfigError;
use crate::sections::{OutputConfig, OutputTarget, TracingConfig, TracingFormat};
use crate::LoggingConfig;

/// The live logging graph: a registry of channels plus the outputs they share.
///
/// Built once at startup and handed to whatever needs a channel. Dropping it
/// drops the registry handle and the outputs it owns; file outputs flush.
pub struct LoggingSetup {
	registry: ChannelRegistry,
	outputs: BTreeMap<String, Arc<dyn LogOutput>>,
	memory: BTreeMap<String, MemoryOutput>,
}

impl LoggingSetup {
	/// Open every enabled output, register every channel and attach outputs.
	pub fn build(config: &LoggingConfig) -> Result<Self, ConfigError> {
		let mut outputs = BTreeMap::new();
		let mut memory = BTreeMap::new();

		for output in config.outputs.iter().filter(|o| o.enabled) {
			let built = open_output(output, &mut memory)?;
			let built = if output.min_severity > Severity::Message {
				Arc::new(FilteredOutput::new(built, output.min_severity)) as Arc<dyn LogOutput>
			} else {
				built
			};
			debug!(output = %output.name, target = ?output.target, "opened log output");
			outputs.insert(output.name.clone(), built);
		}

		let registry = ChannelRegistry::new();
		for channel_config in &config.channels {
			let channel = registry
				.register(channel_config.name.clone())
				.map_err(|e| ConfigError::Validation(e.to_string()))?;
			channel.set_prefix(channel_config.prefix.clone());

			match &channel_config.outputs {
				Some(names) => {
					for name in names {
						// Disabled outputs were never opened.
						if let Some(output) = outputs.get(name) {
							channel.attach(Arc::clone(output));
						}
					}
				}
				None => {
					for output in outputs.values() {
						channel.attach(Arc::clone(output));
					}
				}
			}
		}

		info!(
			channels = registry.len(),
			outputs = outputs.len(),
			"Log channels ready"
		);

		Ok(Self {
			registry,
			outputs,
			memory,
		})
	}

	/// Get the channel registry.
	pub fn registry(&self) -> &ChannelRegistry {
		&self.registry
	}

	/// Get a channel by name.
	pub fn channel(&self, name: &str) -> Option<Arc<LogChannel>> {
		self.registry.get(name)
	}

	/// The opened output named `name`, wrapped in its severity filter if it has one.
	pub fn output(&self, name: &str) -> Option<&Arc<dyn LogOutput>> {
		self.outputs.get(name)
	}

	/// The memory output named `name`, for reading back records.
	pub fn memory(&self, name: &str) -> Option<&MemoryOutput> {
		self.memory.get(name)
	}

	/// Install the global `tracing` subscriber.
	///
	/// `RUST_LOG` wins over the configured level. When `tracing.channel` is
	/// set, every event is also written to that channel.
	pub fn init_tracing(&self, config: &TracingConfig) -> Result<(), ConfigError> {
		let filter = match EnvFilter::try_from_default_env() {
			Ok(filter) => filter,
			Err(_) => EnvFilter::try_new(&config.level).map_err(|e| ConfigError::InvalidValue {
				key: "tracing.level".to_string(),
				message: e.to_string(),
			})?,
		};

		let channel_layer = match &config.channel {
			Some(name) => Some(ChannelLayer::new(self.channel(name).ok_or_else(|| {
				ConfigError::Validation(format!(
					"tracing.channel references unknown channel '{name}'"
				))
			})?)),
			None => None,
		};

		let registry = tracing_subscriber::registry()
			.with(filter)
			.with(channel_layer);

		let result = match config.format {
			TracingFormat::Json => registry
				.with(fmt::layer().json().with_writer(io::stderr))
				.try_init(),
			TracingFormat::Compact => registry
				.with(fmt::layer().compact().with_writer(io::stderr))
				.try_init(),
			TracingFormat::Pretty => registry
				.with(fmt::layer().with_writer(io::stderr))
				.try_init(),
		};

		result.map_err(|e| ConfigError::TracingInit(e.to_string()))
	}
}

impl std::fmt::Debug for LoggingSetup {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("LoggingSetup")
			.field("registry", &self.registry)
			.field("outputs", &self.outputs.keys().collect::<Vec<_>>())
			.finish()
	}
}

fn open_output(
	config: &OutputConfig,
	memory: &mut BTreeMap<String, MemoryOutput>,
) -> Result<Arc<dyn LogOutput>, ConfigError> {
	let output: Arc<dyn LogOutput> = match &config.target {
		OutputTarget::Stdout => Arc::new(TextWriterOutput::stdout(config.name.clone())),
		OutputTarget::Stderr => Arc::new(TextWriterOutput::stderr(config.name.clone())),
		OutputTarget::File { path, append } => Arc::new(
			TextWriterOutput::create_file(path, *append).map_err(|e| ConfigError::OutputOpen {
				name: config.name.clone(),
				path: path.clone(),
				source: e,
			})?,
		),
		OutputTarget::Memory { capacity } => {
			let output = MemoryOutput::new(config.name.clone(), *capacity);
			memory.insert(config.name.clone(), output.clone());
			Arc::new(output)
		}
		OutputTarget::Tracing => Arc::new(TracingOutput::new()),
	};
	Ok(output)
}
