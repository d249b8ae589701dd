use std::process;

use clap::Parser;
use fencefmt_cli::FenceFmtCli;
use fencefmt_core::AnyError;
use fencefmt_core::AnyResult;
use fencefmt_core::FenceError;
use fencefmt_core::FenceMatcher;
use fencefmt_core::FileResult;
use fencefmt_core::Mode;
use fencefmt_core::RunSummary;
use fencefmt_core::process_file;
use fencefmt_core::write_result;
use owo_colors::OwoColorize;
use owo_colors::Style;
use supports_color::Stream;
use tracing_subscriber::EnvFilter;

/// Which output streams get ANSI styling.
#[derive(Debug, Clone, Copy)]
struct Palette {
	stdout: bool,
	stderr: bool,
}

impl Palette {
	/// Color is off under `--no-color` or `NO_COLOR`, and on a stream that
	/// is not a color-capable terminal.
	fn detect(no_color: bool) -> Self {
		let wanted = !no_color && std::env::var_os("NO_COLOR").is_none();
		Self {
			stdout: wanted && supports_color::on(Stream::Stdout).is_some(),
			stderr: wanted && supports_color::on(Stream::Stderr).is_some(),
		}
	}

	fn paint(enabled: bool, text: &str, style: Style) -> String {
		if enabled {
			text.style(style).to_string()
		} else {
			text.to_string()
		}
	}

	fn warning(self) -> String {
		Self::paint(self.stderr, "warning:", Style::new().yellow())
	}

	fn error(self) -> String {
		Self::paint(self.stderr, "error:", Style::new().red())
	}

	/// Style one line of a unified diff by its leading marker.
	fn diff_line(self, line: &str) -> String {
		let style = if line.starts_with("---") || line.starts_with("+++") {
			Style::new().bold()
		} else if line.starts_with("@@") {
			Style::new().cyan()
		} else if line.starts_with('-') {
			Style::new().red()
		} else if line.starts_with('+') {
			Style::new().green()
		} else {
			return line.to_string();
		};
		Self::paint(self.stdout, line, style)
	}
}

fn main() {
	let args = FenceFmtCli::parse();
	let palette = Palette::detect(args.no_color);

	let fancy = palette.stderr;
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(fancy)
				.unicode(fancy)
				.build(),
		)
	}))
	.ok();

	init_tracing(args.verbose, palette.stderr);

	match run(&args, palette) {
		Ok(0) => {}
		Ok(code) => process::exit(code),
		Err(e) => {
			report_fatal(e, palette);
			process::exit(2);
		}
	}
}

/// Logs go to stderr so they never mix with diffs on stdout. The default
/// level is `error`: rejected blocks are already reported by
/// `print_failures`. `RUST_LOG` overrides the level picked from `--verbose`.
fn init_tracing(verbose: bool, ansi: bool) {
	let level = if verbose { "debug" } else { "error" };
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(ansi)
		.with_target(false)
		.without_time()
		.try_init()
		.ok();
}

/// Our own errors go through miette so their help text and code show up.
fn report_fatal(error: AnyError, palette: Palette) {
	match error.downcast::<FenceError>() {
		Ok(fence_err) => eprintln!("{:?}", miette::Report::new(*fence_err)),
		Err(other) => eprintln!("{} {other}", palette.error()),
	}
}

/// Format every file and return the process exit code.
fn run(args: &FenceFmtCli, palette: Palette) -> AnyResult<i32> {
	let matcher = FenceMatcher::new(&args.lang)?;
	let formatter = args.external_formatter();
	let mode = args.mode();
	let mut summary = RunSummary::default();

	tracing::debug!(
		%mode,
		tag = matcher.tag(),
		formatter = formatter.program(),
		files = args.files.len(),
		"starting run"
	);

	for path in &args.files {
		let result = process_file(path, &matcher, &formatter)?;
		print_failures(&result, formatter.program(), palette);
		summary.record(&result);

		if !result.is_changed() {
			continue;
		}

		match mode {
			Mode::Write => {
				write_result(&result)?;
				println!("Formatted {}", path.display());
			}
			Mode::Review => print_diff(&result.diff(), palette),
		}
	}

	if args.verbose {
		eprintln!(
			"{} file(s) checked, {} changed, {} block(s) rejected by the formatter",
			summary.checked, summary.changed, summary.failed_blocks
		);
	}

	if mode == Mode::Review && summary.changed > 0 {
		eprintln!(
			"{} file(s) would be reformatted. Run with `--write` to apply.",
			summary.changed
		);
	}

	Ok(summary.exit_code(mode))
}

/// Report blocks the formatter rejected, with the body it was given.
fn print_failures(result: &FileResult, program: &str, palette: Palette) {
	for failure in &result.failures {
		eprintln!(
			"{} {program} failed on block at {}:{}: {}",
			palette.warning(),
			result.path.display(),
			failure.line,
			failure.message
		);
		eprintln!("On:\n{}", failure.original);
	}
}

/// Print a unified diff to stdout, keeping its line endings intact.
fn print_diff(diff: &str, palette: Palette) {
	if !palette.stdout {
		print!("{diff}");
		return;
	}

	for line in diff.split_inclusive('\n') {
		match line.strip_suffix('\n') {
			Some(text) => println!("{}", palette.diff_line(text)),
			None => print!("{}", palette.diff_line(line)),
		}
	}
}
