// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Text-stream output for consoles and files.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use parking_lot::Mutex;

use crate::context::Context;
use crate::error::OutputError;
use crate::output::{LogOutput, LogSource};
use crate::severity::Severity;

/// An output that renders messages as text lines into any [`Write`] sink.
///
/// All lines of one message are written and flushed under a single lock, so
/// concurrent writers never interleave their lines.
pub struct TextWriterOutput<W: Write + Send> {
	name: String,
	/// `None` once the output has been closed.
	writer: Mutex<Option<W>>,
}

impl<W: Write + Send> TextWriterOutput<W> {
	/// Wrap `writer` as an output named `name`.
	pub fn new(name: impl Into<String>, writer: W) -> Self {
		Self {
			name: name.into(),
			writer: Mutex::new(Some(writer)),
		}
	}

	/// Flush and release the underlying writer. Later writes fail with
	/// [`OutputError::Closed`].
	pub fn close(&self) -> io::Result<()> {
		match self.writer.lock().take() {
			Some(mut writer) => writer.flush(),
			None => Ok(()),
		}
	}

	/// Check if the output has been closed.
	pub fn is_closed(&self) -> bool {
		self.writer.lock().is_none()
	}
}

impl TextWriterOutput<io::Stdout> {
	/// Write to the process's standard output.
	pub fn stdout(name: impl Into<String>) -> Self {
		Self::new(name, io::stdout())
	}
}

impl TextWriterOutput<io::Stderr> {
	/// Write to the process's standard error.
	pub fn stderr(name: impl Into<String>) -> Self {
		Self::new(name, io::stderr())
	}
}

impl TextWriterOutput<BufWriter<File>> {
	/// Open `path` for writing, creating it if needed.
	pub fn create_file(path: impl AsRef<Path>, append: bool) -> io::Result<Self> {
		let path = path.as_ref();
		if let Some(parent) = path.parent() {
			if !parent.as_os_str().is_empty() {
				std::fs::create_dir_all(parent)?;
			}
		}

		let file = OpenOptions::new()
			.create(true)
			.write(true)
			.append(append)
			.truncate(!append)
			.open(path)?;

		Ok(Self::new(path.display().to_string(), BufWriter::new(file)))
	}
}

impl<W: Write + Send> LogOutput for TextWriterOutput<W> {
	fn name(&self) -> &str {
		&self.name
	}

	fn write(
		&self,
		source: &LogSource<'_>,
		severity: Severity,
		message: &str,
		_context: Context<'_>,
	) -> Result<(), OutputError> {
		let lines = source.render(severity, message);
		// Nothing to emit, so a closed writer is not an error.
		if lines.is_empty() {
			return Ok(());
		}

		let mut guard = self.writer.lock();
		let writer = guard.as_mut().ok_or(OutputError::Closed)?;

		for line in &lines {
			writeln!(writer, "{line}")?;
		}
		writer.flush()?;

		Ok(())
	}
}

impl<W: Write + Send> Drop for TextWriterOutput<W> {
	fn drop(&mut self) {
		if let Some(writer) = self.writer.get_mut().as_mut() {
			let _ = writer.flush();
		}
	}
}
