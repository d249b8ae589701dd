use regex::Regex;

use crate::BlockOutcome;
use crate::FenceError;
use crate::FenceResult;
use crate::Formatter;
use crate::format_block;

/// The fence marker that opens and closes a code block.
pub const FENCE: &str = "```";

/// Language tag formatted when none is given.
pub const DEFAULT_LANGUAGE_TAG: &str = "melbi";

/// Finds fenced code blocks tagged with one language.
///
/// A block opens on a line made of optional spaces or tabs, the fence and
/// the tag, and runs lazily up to the next line that starts with a fence
/// (after any indentation). Fences carrying other tags inside the body are
/// treated as the closing fence, so nested fences are not supported.
#[derive(Debug, Clone)]
pub struct FenceMatcher {
	tag: String,
	pattern: Regex,
}

impl FenceMatcher {
	pub fn new(tag: impl Into<String>) -> FenceResult<Self> {
		let tag = tag.into();
		if tag.is_empty() || tag.chars().any(char::is_whitespace) {
			return Err(FenceError::InvalidLanguageTag(tag));
		}

		let source = format!(
			r"(?ms)(^([ \t]*){FENCE}{}\r?\n)(.*?)(^[ \t]*{FENCE})",
			regex::escape(&tag)
		);
		let pattern =
			Regex::new(&source).map_err(|_| FenceError::InvalidLanguageTag(tag.clone()))?;

		Ok(Self { tag, pattern })
	}

	pub fn tag(&self) -> &str {
		&self.tag
	}

	/// Iterate over every matching block in `content`, left to right.
	pub fn find_blocks<'a>(
		&'a self,
		content: &'a str,
	) -> impl Iterator<Item = CodeBlock<'a>> + 'a {
		self.pattern.captures_iter(content).filter_map(|caps| {
			let whole = caps.get(0)?;
			Some(CodeBlock {
				start: whole.start(),
				end: whole.end(),
				opening: caps.get(1)?.as_str(),
				indent: caps.get(2)?.as_str(),
				body: caps.get(3)?.as_str(),
			})
		})
	}
}

/// One matched block, borrowed from the document it was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeBlock<'a> {
	/// Byte offset of the start of the opening fence line.
	pub start: usize,
	/// Byte offset just past the closing fence marker.
	pub end: usize,
	/// The opening fence line, including indentation and line break.
	pub opening: &'a str,
	/// Leading whitespace of the opening fence.
	pub indent: &'a str,
	/// Everything between the opening fence line and the closing fence line.
	pub body: &'a str,
}

/// A block the formatter rejected. Its content was left as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockFailure {
	/// 1-indexed line of the opening fence.
	pub line: usize,
	/// Trimmed error output from the formatter.
	pub message: String,
	/// The block body exactly as it was handed to the formatter.
	pub original: String,
}

/// Result of formatting every matching block in one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentOutcome {
	/// The rewritten document.
	pub content: String,
	/// Number of blocks that matched.
	pub blocks: usize,
	/// Blocks the formatter rejected.
	pub failures: Vec<BlockFailure>,
}

/// Remove `indent` from the start of every line that begins with it.
pub fn strip_indent(text: &str, indent: &str) -> String {
	if indent.is_empty() {
		return text.to_string();
	}

	text.split('\n')
		.map(|line| line.strip_prefix(indent).unwrap_or(line))
		.collect::<Vec<_>>()
		.join("\n")
}

/// Prefix every line of `text` with `indent`.
///
/// A trailing newline produces one more (empty) line, which is prefixed as
/// well. An empty string is a single empty line.
pub fn apply_indent(text: &str, indent: &str) -> String {
	if indent.is_empty() {
		return text.to_string();
	}

	text.split('\n')
		.map(|line| format!("{indent}{line}"))
		.collect::<Vec<_>>()
		.join("\n")
}

/// Format every block in `content` that `matcher` finds.
///
/// Text outside the matched blocks is copied unchanged. Each block is
/// de-indented by its opening fence's indentation, formatted, re-indented
/// and closed with a bare [`FENCE`]. Nothing is appended after the
/// formatter's output, so a result without a trailing newline runs straight
/// into the closing fence. Blocks the formatter rejects are left exactly as
/// they were.
pub fn format_document<F: Formatter + ?Sized>(
	content: &str,
	matcher: &FenceMatcher,
	formatter: &F,
) -> FenceResult<DocumentOutcome> {
	let mut output = String::with_capacity(content.len());
	let mut failures = Vec::new();
	let mut blocks = 0;
	let mut last_end = 0;
	let mut line = 1;

	for block in matcher.find_blocks(content) {
		let before = &content[last_end..block.start];
		line += before.matches('\n').count();
		output.push_str(before);

		tracing::debug!(line, tag = matcher.tag(), "formatting block");
		let code = strip_indent(block.body, block.indent);
		let outcome = format_block(formatter, &code)?;

		match outcome {
			BlockOutcome::Formatted(text) => {
				output.push_str(block.opening);
				output.push_str(&apply_indent(&text, block.indent));
				output.push_str(FENCE);
			}
			// A rejected block is copied back untouched, fences included.
			BlockOutcome::Failed { original, message } => {
				output.push_str(&content[block.start..block.end]);
				failures.push(BlockFailure {
					line,
					message,
					original,
				});
			}
		}

		line += content[block.start..block.end].matches('\n').count();
		last_end = block.end;
		blocks += 1;
	}

	output.push_str(&content[last_end..]);

	Ok(DocumentOutcome {
		content: output,
		blocks,
		failures,
	})
}
