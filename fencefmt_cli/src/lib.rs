use std::path::PathBuf;

use clap::Parser;
use fencefmt_core::DEFAULT_FORMATTER;
use fencefmt_core::DEFAULT_LANGUAGE_TAG;
use fencefmt_core::ExternalFormatter;
use fencefmt_core::Mode;

#[derive(Debug, Parser)]
#[command(
	author,
	version,
	about = "Format fenced code blocks inside markdown files.",
	long_about = "fencefmt finds fenced code blocks tagged with one language inside markdown \
	              files, pipes each block through an external formatter and splices the result \
	              back into the document.\n\nBy default it prints a unified diff of the changes \
	              and exits with status 1 when any file needs formatting, which makes it \
	              suitable for CI. Pass `--write` to update the files in place instead."
)]
pub struct FenceFmtCli {
	/// Markdown files to process.
	#[arg(required = true, value_name = "FILES")]
	pub files: Vec<PathBuf>,

	/// Write changes in place instead of printing a diff.
	#[arg(long, short, default_value_t = false)]
	pub write: bool,

	/// Language tag of the code blocks to format.
	#[arg(long, value_name = "TAG", default_value = DEFAULT_LANGUAGE_TAG)]
	pub lang: String,

	/// Formatter executable, looked up on `PATH`.
	#[arg(long, value_name = "PROGRAM", default_value = DEFAULT_FORMATTER)]
	pub formatter: String,

	/// Argument passed to the formatter. Repeat for several arguments. The
	/// default `-s` tells `melbi-fmt` to read from stdin; any
	/// `--formatter-arg` replaces it entirely. Use `--no-formatter-args` to run
	/// the formatter with no arguments at all.
	#[arg(
		long = "formatter-arg",
		value_name = "ARG",
		default_value = "-s",
		allow_hyphen_values = true
	)]
	pub formatter_args: Vec<String>,

	/// Run the formatter without any arguments, dropping the default `-s`.
	#[arg(long, default_value_t = false, conflicts_with = "formatter_args")]
	pub no_formatter_args: bool,

	/// Enable verbose output.
	#[arg(long, short, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, default_value_t = false)]
	pub no_color: bool,
}

impl FenceFmtCli {
	pub fn mode(&self) -> Mode {
		if self.write { Mode::Write } else { Mode::Review }
	}

	pub fn external_formatter(&self) -> ExternalFormatter {
		let args: &[String] = if self.no_formatter_args {
			&[]
		} else {
			&self.formatter_args
		};
		ExternalFormatter::new(&self.formatter, args)
	}
}
