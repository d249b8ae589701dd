use std::fmt;
use std::path::Path;
use std::path::PathBuf;

use similar::TextDiff;

use crate::BlockFailure;
use crate::FenceError;
use crate::FenceMatcher;
use crate::FenceResult;
use crate::Formatter;
use crate::format_document;

/// Lines of unchanged context around each diff hunk.
pub const DIFF_CONTEXT_LINES: usize = 3;

/// What to do with a file whose formatted content differs from disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
	/// Print a unified diff and leave the file alone.
	#[default]
	Review,
	/// Overwrite the file with the formatted content.
	Write,
}

impl fmt::Display for Mode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Review => write!(f, "review"),
			Self::Write => write!(f, "write"),
		}
	}
}

/// The outcome of formatting one file in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileResult {
	pub path: PathBuf,
	/// Content as read from disk.
	pub original: String,
	/// Content after formatting every matching block.
	pub formatted: String,
	/// Number of matching blocks in the file.
	pub blocks: usize,
	/// Blocks left untouched because the formatter rejected them.
	pub failures: Vec<BlockFailure>,
}

impl FileResult {
	/// Returns true if formatting changed the file's content.
	pub fn is_changed(&self) -> bool {
		self.original != self.formatted
	}

	/// Unified diff between the original and formatted content, labelled
	/// `a/<path>` and `b/<path>`.
	pub fn diff(&self) -> String {
		let label = self.path.display().to_string();
		unified_diff(&label, &self.original, &self.formatted)
	}
}

/// Read `path`, format its blocks and return the result without touching
/// the file.
pub fn process_file<F: Formatter + ?Sized>(
	path: &Path,
	matcher: &FenceMatcher,
	formatter: &F,
) -> FenceResult<FileResult> {
	let original = std::fs::read_to_string(path).map_err(|source| {
		FenceError::ReadFile {
			path: path.to_path_buf(),
			source,
		}
	})?;

	tracing::debug!(path = %path.display(), "processing file");
	let outcome = format_document(&original, matcher, formatter)?;

	Ok(FileResult {
		path: path.to_path_buf(),
		original,
		formatted: outcome.content,
		blocks: outcome.blocks,
		failures: outcome.failures,
	})
}

/// Overwrite the file with its formatted content.
pub fn write_result(result: &FileResult) -> FenceResult<()> {
	std::fs::write(&result.path, &result.formatted).map_err(|source| {
		FenceError::WriteFile {
			path: result.path.clone(),
			source,
		}
	})
}

/// Render a unified diff between `original` and `formatted`.
///
/// Returns an empty string when the two are equal.
pub fn unified_diff(label: &str, original: &str, formatted: &str) -> String {
	if original == formatted {
		return String::new();
	}

	TextDiff::from_lines(original, formatted)
		.unified_diff()
		.context_radius(DIFF_CONTEXT_LINES)
		.header(&format!("a/{label}"), &format!("b/{label}"))
		.to_string()
}

/// Running tally for one invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
	/// Files processed.
	pub checked: usize,
	/// Files whose formatted content differed from disk.
	pub changed: usize,
	/// Blocks the formatter rejected across all files.
	pub failed_blocks: usize,
}

impl RunSummary {
	pub fn record(&mut self, result: &FileResult) {
		self.checked += 1;
		self.failed_blocks += result.failures.len();
		if result.is_changed() {
			self.changed += 1;
		}
	}

	/// Process exit code: `1` when review mode found pending changes,
	/// otherwise `0`.
	pub fn exit_code(&self, mode: Mode) -> i32 {
		match mode {
			Mode::Review if self.changed > 0 => 1,
			_ => 0,
		}
	}
}
