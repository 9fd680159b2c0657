// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Plain-text rendering of log messages.
//!
//! A message renders as one line per non-empty segment:
//!
//! ```text
//! <prefix><tag><4 * indent spaces><first segment>
//! <len(prefix) + 9 + 4 * indent spaces><next segment>
//! ```

use crate::severity::{Severity, TAG_WIDTH};

/// Spaces added per indent level.
pub const INDENT_WIDTH: usize = 4;

/// Characters that terminate a line inside a message. NUL is included literally.
pub const LINE_TERMINATORS: &[char] = &['\n', '\r', '\0'];

/// Split a message into its non-empty lines.
pub fn split_lines(message: &str) -> impl Iterator<Item = &str> {
	message.split(LINE_TERMINATORS).filter(|line| !line.is_empty())
}

/// Render a message into complete lines, without line terminators.
///
/// `prefix` length is measured in `char`s when computing the continuation
/// offset. A message with no non-empty lines renders nothing.
pub fn render_lines(prefix: &str, indent: usize, severity: Severity, message: &str) -> Vec<String> {
	let body_indent = indent * INDENT_WIDTH;
	let continuation = prefix.chars().count() + TAG_WIDTH + body_indent;

	split_lines(message)
		.enumerate()
		.map(|(i, line)| {
			if i == 0 {
				format!("{prefix}{}{:body_indent$}{line}", severity.tag(), "")
			} else {
				format!("{:continuation$}{line}", "")
			}
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn test_warning_with_indent() {
		let lines = render_lines("", 1, Severity::Warning, "bad state\nretrying");
		assert_eq!(lines, vec!["Warning:     bad state", "             retrying"]);
	}

	#[test]
	fn test_prefix_and_tags() {
		assert_eq!(
			render_lines("[Core] ", 0, Severity::Message, "loaded"),
			vec!["[Core] Info:    loaded"]
		);
		assert_eq!(
			render_lines("[Core] ", 2, Severity::Error, "boom\nstack"),
			vec![
				"[Core] ERROR:           boom",
				"                        stack"
			]
		);
	}

	#[test]
	fn test_crlf_does_not_produce_blank_lines() {
		let lines = render_lines("", 0, Severity::Message, "\r\nfirst\r\nsecond\r\n");
		assert_eq!(lines, vec!["Info:    first", "         second"]);
	}

	#[test]
	fn test_nul_is_a_terminator() {
		let lines = render_lines("", 0, Severity::Message, "one\0two");
		assert_eq!(lines, vec!["Info:    one", "         two"]);
	}

	#[test]
	fn test_terminator_only_message_renders_nothing() {
		assert!(render_lines("p", 3, Severity::Error, "\n\r\0").is_empty());
		assert!(render_lines("", 0, Severity::Message, "").is_empty());
	}

	#[test]
	fn test_multibyte_prefix_counts_chars() {
		let lines = render_lines("» ", 0, Severity::Message, "a\nb");
		assert_eq!(lines[1], format!("{}b", " ".repeat(2 + TAG_WIDTH)));
	}

	proptest! {
		/// First line is prefix + tag + indent + first segment; the rest align under the body.
		#[test]
		fn rendered_lines_follow_layout(
			prefix in "[a-zA-Z\\[\\] ]{0,12}",
			indent in 0usize..6,
			segments in prop::collection::vec("[a-z ]{1,20}", 1..5),
			severity in prop::sample::select(Severity::ALL.to_vec()),
		) {
			let message = segments.join("\n");
			let lines = render_lines(&prefix, indent, severity, &message);
			let expected: Vec<&str> = split_lines(&message).collect();
			prop_assert_eq!(lines.len(), expected.len());
			prop_assert_eq!(
				&lines[0],
				&format!("{}{}{}{}", prefix, severity.tag(), " ".repeat(4 * indent), expected[0])
			);
			for (line, segment) in lines.iter().zip(expected.iter()).skip(1) {
				let pad = " ".repeat(prefix.chars().count() + TAG_WIDTH + 4 * indent);
				prop_assert_eq!(line, &format!("{}{}", pad, segment));
			}
		}

		/// Messages made only of terminators never render.
		#[test]
		fn terminator_only_messages_render_nothing(message in "[\n\r\u{0}]{0,16}") {
			prop_assert!(render_lines("x", 1, Severity::Warning, &message).is_empty());
		}

		/// Rendered lines never contain a terminator.
		#[test]
		fn rendered_lines_are_single_lines(message in "[a-z\n\r\u{0}]{0,40}") {
			for line in render_lines("", 2, Severity::Message, &message) {
				prop_assert!(!line.contains(LINE_TERMINATORS));
			}
		}
	}
}
