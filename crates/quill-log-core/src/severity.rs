// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Message severities and their fixed-width formatting tags.

use serde::{Deserialize, Serialize};

/// Visible width of every severity tag.
///
/// Continuation lines of a multi-line message are offset by this width so
/// they align under the first character of the message body.
pub const TAG_WIDTH: usize = 9;

/// Classification of a log message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
	#[serde(alias = "info")]
	Message,
	#[serde(alias = "warn")]
	Warning,
	Error,
}

impl Severity {
	/// All severities, lowest first.
	pub const ALL: [Severity; 3] = [Severity::Message, Severity::Warning, Severity::Error];

	/// The padded tag prepended to the first rendered line of a message.
	pub fn tag(&self) -> &'static str {
		match self {
			Severity::Message => "Info:    ",
			Severity::Warning => "Warning: ",
			Severity::Error => "ERROR:   ",
		}
	}

	/// Get the string representation.
	pub fn as_str(&self) -> &'static str {
		match self {
			Severity::Message => "message",
			Severity::Warning => "warning",
			Severity::Error => "error",
		}
	}

	/// Convert from a tracing level. Anything below WARN is a plain message.
	pub fn from_tracing(level: &tracing::Level) -> Self {
		match *level {
			tracing::Level::ERROR => Severity::Error,
			tracing::Level::WARN => Severity::Warning,
			_ => Severity::Message,
		}
	}

	/// The tracing level a message of this severity is reported at.
	pub fn to_tracing(&self) -> tracing::Level {
		match self {
			Severity::Message => tracing::Level::INFO,
			Severity::Warning => tracing::Level::WARN,
			Severity::Error => tracing::Level::ERROR,
		}
	}
}

impl std::fmt::Display for Severity {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

impl std::str::FromStr for Severity {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"message" | "info" => Ok(Severity::Message),
			"warning" | "warn" => Ok(Severity::Warning),
			"error" => Ok(Severity::Error),
			other => Err(format!("unknown severity '{other}'")),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_tags_have_fixed_width() {
		for severity in Severity::ALL {
			assert_eq!(severity.tag().len(), TAG_WIDTH, "tag for {severity}");
		}
	}

	#[test]
	fn test_tag_text() {
		assert_eq!(Severity::Message.tag(), "Info:    ");
		assert_eq!(Severity::Warning.tag(), "Warning: ");
		assert_eq!(Severity::Error.tag(), "ERROR:   ");
	}

	#[test]
	fn test_severity_ordering() {
		assert!(Severity::Message < Severity::Warning);
		assert!(Severity::Warning < Severity::Error);
	}

	#[test]
	fn test_tracing_conversion() {
		assert_eq!(Severity::from_tracing(&tracing::Level::TRACE), Severity::Message);
		assert_eq!(Severity::from_tracing(&tracing::Level::DEBUG), Severity::Message);
		assert_eq!(Severity::from_tracing(&tracing::Level::INFO), Severity::Message);
		assert_eq!(Severity::from_tracing(&tracing::Level::WARN), Severity::Warning);
		assert_eq!(Severity::from_tracing(&tracing::Level::ERROR), Severity::Error);
		assert_eq!(Severity::Warning.to_tracing(), tracing::Level::WARN);
	}

	#[test]
	fn test_parse() {
		assert_eq!("warn".parse::<Severity>(), Ok(Severity::Warning));
		assert_eq!("ERROR".parse::<Severity>(), Ok(Severity::Error));
		assert_eq!("info".parse::<Severity>(), Ok(Severity::Message));
		assert!("fatal".parse::<Severity>().is_err());
	}

	#[test]
	fn test_serde_lowercase() {
		let json = serde_json::to_string(&Severity::Warning).unwrap();
		assert_eq!(json, "\"warning\"");
		let parsed: Severity = serde_json::from_str("\"error\"").unwrap();
		assert_eq!(parsed, Severity::Error);
	}

	#[test]
	fn test_serde_accepts_parse_aliases() {
		for (name, expected) in [
			("info", Severity::Message),
			("message", Severity::Message),
			("warn", Severity::Warning),
			("warning", Severity::Warning),
		] {
			let parsed: Severity = serde_json::from_str(&format!("\"{name}\"")).unwrap();
			assert_eq!(parsed, expected);
			assert_eq!(name.parse::<Severity>(), Ok(expected));
		}
		assert_eq!(serde_json::to_string(&Severity::Message).unwrap(), "\"message\"");
	}
}
