use std::io::ErrorKind;
use std::io::Write;
use std::process::Command;
use std::process::Stdio;
use std::thread;

use crate::FenceError;
use crate::FenceResult;

/// Default formatter executable, looked up on `PATH`.
pub const DEFAULT_FORMATTER: &str = "melbi-fmt";

/// Flag that tells the default formatter to read from stdin and write the
/// result to stdout.
pub const DEFAULT_FORMATTER_ARGS: [&str; 1] = ["-s"];

/// Raw output captured from one formatter invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatterOutput {
	/// Whether the process exited with status zero.
	pub success: bool,
	pub stdout: String,
	pub stderr: String,
	/// The exit code, when the process was not killed by a signal.
	pub exit_code: Option<i32>,
}

/// Something that can format a single code block body.
///
/// Implementations return `Err` only when the formatter cannot be run at
/// all. A formatter that runs and rejects its input reports that through
/// [`FormatterOutput::success`].
pub trait Formatter {
	/// Human-readable name used in diagnostics.
	fn name(&self) -> &str;

	/// Feed `code` to the formatter and capture what it produced.
	fn run(&self, code: &str) -> FenceResult<FormatterOutput>;
}

/// A formatter implemented by an external executable that reads source on
/// stdin and writes the formatted result to stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalFormatter {
	program: String,
	args: Vec<String>,
}

impl ExternalFormatter {
	pub fn new<P, I, A>(program: P, args: I) -> Self
	where
		P: Into<String>,
		I: IntoIterator<Item = A>,
		A: Into<String>,
	{
		Self {
			program: program.into(),
			args: args.into_iter().map(Into::into).collect(),
		}
	}

	pub fn program(&self) -> &str {
		&self.program
	}

	pub fn args(&self) -> &[String] {
		&self.args
	}
}

impl Default for ExternalFormatter {
	fn default() -> Self {
		Self::new(DEFAULT_FORMATTER, DEFAULT_FORMATTER_ARGS)
	}
}

impl Formatter for ExternalFormatter {
	fn name(&self) -> &str {
		&self.program
	}

	fn run(&self, code: &str) -> FenceResult<FormatterOutput> {
		let mut child = Command::new(&self.program)
			.args(&self.args)
			.stdin(Stdio::piped())
			.stdout(Stdio::piped())
			.stderr(Stdio::piped())
			.spawn()
			.map_err(|source| {
				FenceError::FormatterSpawn {
					program: self.program.clone(),
					source,
				}
			})?;

		// Feed stdin from a separate thread so a large block cannot deadlock
		// against a full stdout pipe.
		let writer = child.stdin.take().map(|mut stdin| {
			let input = code.to_owned();
			thread::spawn(move || {
				match stdin.write_all(input.as_bytes()) {
					// The formatter may exit without consuming its input.
					Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
					other => other,
				}
			})
		});

		let output = child.wait_with_output().map_err(|e| {
			FenceError::FormatterIo {
				program: self.program.clone(),
				reason: e.to_string(),
			}
		})?;

		if let Some(handle) = writer {
			let written = handle.join().map_err(|_| {
				FenceError::FormatterIo {
					program: self.program.clone(),
					reason: "stdin writer thread panicked".to_string(),
				}
			})?;
			written.map_err(|e| {
				FenceError::FormatterIo {
					program: self.program.clone(),
					reason: format!("failed to write to stdin: {e}"),
				}
			})?;
		}

		Ok(FormatterOutput {
			success: output.status.success(),
			stdout: String::from_utf8_lossy(&output.stdout).to_string(),
			stderr: String::from_utf8_lossy(&output.stderr).to_string(),
			exit_code: output.status.code(),
		})
	}
}

/// Result of formatting one block body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockOutcome {
	/// The formatter succeeded; holds its stdout verbatim.
	Formatted(String),
	/// The formatter rejected the block. `original` is the unchanged input.
	Failed { original: String, message: String },
}

impl BlockOutcome {
	/// The text that should be written back into the document.
	pub fn text(&self) -> &str {
		match self {
			Self::Formatted(text) => text,
			Self::Failed { original, .. } => original,
		}
	}

	pub fn is_failed(&self) -> bool {
		matches!(self, Self::Failed { .. })
	}
}

/// Run `code` through `formatter`.
///
/// A non-zero exit never loses content: the original body comes back inside
/// [`BlockOutcome::Failed`] together with the trimmed stderr. Only a failure
/// to launch the formatter is returned as an error.
pub fn format_block<F: Formatter + ?Sized>(
	formatter: &F,
	code: &str,
) -> FenceResult<BlockOutcome> {
	let output = formatter.run(code)?;

	if output.success {
		return Ok(BlockOutcome::Formatted(output.stdout));
	}

	let stderr = output.stderr.trim();
	let message = if stderr.is_empty() {
		format!(
			"exited with status {}",
			output
				.exit_code
				.map_or_else(|| "unknown".to_string(), |code| code.to_string())
		)
	} else {
		stderr.to_string()
	};

	tracing::warn!(
		formatter = formatter.name(),
		error = %message,
		"formatter rejected block"
	);

	Ok(BlockOutcome::Failed {
		original: code.to_string(),
		message,
	})
}
