use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum FenceError {
	#[error("failed to read `{path}`")]
	#[diagnostic(code(fencefmt::read_file))]
	ReadFile {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to write `{path}`")]
	#[diagnostic(
		code(fencefmt::write_file),
		help("check that the file is writable")
	)]
	WriteFile {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to launch formatter `{program}`")]
	#[diagnostic(
		code(fencefmt::formatter_spawn),
		help("make sure `{program}` is installed and on your PATH, or pass `--formatter`")
	)]
	FormatterSpawn {
		program: String,
		#[source]
		source: std::io::Error,
	},

	#[error("formatter `{program}` could not be run to completion: {reason}")]
	#[diagnostic(code(fencefmt::formatter_io))]
	FormatterIo { program: String, reason: String },

	#[error("invalid code block language tag: `{0}`")]
	#[diagnostic(
		code(fencefmt::invalid_language_tag),
		help("the tag must be non-empty and contain no whitespace")
	)]
	InvalidLanguageTag(String),
}

pub type FenceResult<T> = Result<T, FenceError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
