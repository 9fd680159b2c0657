// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: built-in defaults, TOML files and environment variables.

use std::collections::BTreeMap;
use std::path::PathBuf;

use quill_log_core::Severity;
use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::LoggingConfigLayer;
use crate::sections::{
	OutputConfigLayer, OutputKind, TracingConfigLayer, TracingFormat, CONSOLE_OUTPUT, FILE_OUTPUT,
};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<LoggingConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<LoggingConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(LoggingConfigLayer::defaults())
	}
}

/// TOML file configuration source. A missing file contributes nothing.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<LoggingConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(LoggingConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: LoggingConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: QUILL_LOG_<FIELD>
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<LoggingConfigLayer, ConfigError> {
		debug!("loading environment variables");
		let outputs = load_outputs_from_env()?;
		Ok(LoggingConfigLayer {
			tracing: Some(load_tracing_from_env()?),
			channels: None,
			outputs: (!outputs.is_empty()).then_some(outputs),
		})
	}
}

fn env_var(name: &str) -> Option<String> {
	std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn env_parsed<T>(name: &str) -> Result<Option<T>, ConfigError>
where
	T: std::str::FromStr<Err = String>,
{
	match env_var(name) {
		Some(v) => v.parse().map(Some).map_err(|message| ConfigError::InvalidValue {
			key: name.to_string(),
			message,
		}),
		None => Ok(None),
	}
}

fn load_tracing_from_env() -> Result<TracingConfigLayer, ConfigError> {
	Ok(TracingConfigLayer {
		level: env_var("QUILL_LOG_LEVEL"),
		format: env_parsed::<TracingFormat>("QUILL_LOG_FORMAT")?,
		channel: env_var("QUILL_LOG_TRACING_CHANNEL"),
	})
}

fn load_outputs_from_env() -> Result<BTreeMap<String, OutputConfigLayer>, ConfigError> {
	let mut outputs = BTreeMap::new();

	let mut console = match env_var("QUILL_LOG_CONSOLE") {
		Some(v) => parse_console("QUILL_LOG_CONSOLE", &v)?,
		None => OutputConfigLayer::default(),
	};
	console.min_severity = env_parsed::<Severity>("QUILL_LOG_MIN_SEVERITY")?;
	if console != OutputConfigLayer::default() {
		outputs.insert(CONSOLE_OUTPUT.to_string(), console);
	}

	if let Some(path) = env_var("QUILL_LOG_FILE") {
		outputs.insert(
			FILE_OUTPUT.to_string(),
			OutputConfigLayer {
				path: Some(PathBuf::from(path)),
				..OutputConfigLayer::of_kind(OutputKind::File)
			},
		);
	}

	Ok(outputs)
}

/// `stdout` and `stderr` pick the console stream, `none` disables it.
fn parse_console(key: &str, value: &str) -> Result<OutputConfigLayer, ConfigError> {
	match value.to_lowercase().as_str() {
		"stdout" => Ok(OutputConfigLayer {
			enabled: Some(true),
			..OutputConfigLayer::of_kind(OutputKind::Stdout)
		}),
		"stderr" => Ok(OutputConfigLayer {
			enabled: Some(true),
			..OutputConfigLayer::of_kind(OutputKind::Stderr)
		}),
		"none" | "off" => Ok(OutputConfigLayer {
			enabled: Some(false),
			..Default::default()
		}),
		other => Err(ConfigError::InvalidValue {
			key: key.to_string(),
			message: format!("expected stdout, stderr or none, got '{other}'"),
		}),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_precedence_ordering() {
		assert!(Precedence::Environment > Precedence::ConfigFile);
		assert!(Precedence::ConfigFile > Precedence::Defaults);
	}

	#[test]
	fn test_defaults_source_returns_standard_layer() {
		let layer = DefaultsSource.load().unwrap();
		assert_eq!(layer.channels.unwrap().len(), 3);
		assert!(layer.outputs.unwrap().contains_key(CONSOLE_OUTPUT));
	}

	#[test]
	fn test_toml_source_missing_file_returns_empty() {
		let source = TomlSource::new("/nonexistent/quill.toml");
		let layer = source.load().unwrap();
		assert!(layer.channels.is_none());
		assert!(layer.outputs.is_none());
	}

	#[test]
	fn test_toml_source_reads_file() {
		let temp = tempfile::TempDir::new().unwrap();
		let path = temp.path().join("quill.toml");
		std::fs::write(
			&path,
			r#"
[[channels]]
name = "Audio"
prefix = "[Audio] "
"#,
		)
		.unwrap();

		let layer = TomlSource::new(&path).load().unwrap();
		let channels = layer.channels.unwrap();
		assert_eq!(channels[0].name, "Audio");
		assert_eq!(channels[0].prefix.as_deref(), Some("[Audio] "));
	}

	#[test]
	fn test_toml_source_reports_parse_errors() {
		let temp = tempfile::TempDir::new().unwrap();
		let path = temp.path().join("quill.toml");
		std::fs::write(&path, "[[channels]]\nprefix = 3\n").unwrap();

		let err = TomlSource::new(&path).load().unwrap_err();
		assert!(matches!(err, ConfigError::TomlParse { .. }));
	}

	#[test]
	fn test_parse_console() {
		let stderr = parse_console("K", "STDERR").unwrap();
		assert_eq!(stderr.kind, Some(OutputKind::Stderr));
		assert_eq!(stderr.enabled, Some(true));

		let none = parse_console("K", "none").unwrap();
		assert_eq!(none.enabled, Some(false));
		assert!(none.kind.is_none());

		let err = parse_console("QUILL_LOG_CONSOLE", "printer").unwrap_err();
		assert!(err.to_string().contains("QUILL_LOG_CONSOLE"));
	}
}
