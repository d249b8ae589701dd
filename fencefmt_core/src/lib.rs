//! `fencefmt_core` is the core library for
//! [fencefmt](https://github.com/ifiokjr/fencefmt). It finds fenced code
//! blocks tagged with one language inside markdown documents, pipes each
//! block through an external formatter and splices the result back,
//! leaving the rest of the document byte-for-byte intact.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Markdown file
//!   → FenceMatcher (finds ```tag blocks and their indentation)
//!   → strip_indent (removes the opening fence's indentation from the body)
//!   → Formatter (external process: body on stdin, result on stdout)
//!   → apply_indent (restores the indentation)
//!   → FileResult (original + formatted content, rejected blocks)
//!   → write_result / unified_diff
//! ```
//!
//! ## Key Types
//!
//! - [`FenceMatcher`] — Locates blocks for one language tag.
//! - [`Formatter`] — Runs one block body through a formatter.
//!   [`ExternalFormatter`] is the process-backed implementation.
//! - [`BlockOutcome`] — Formatted text, or the untouched original when the
//!   formatter failed.
//! - [`FileResult`] — The in-memory result for one file.
//! - [`RunSummary`] — Changed-file tally and exit code for a run.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fencefmt_core::ExternalFormatter;
//! use fencefmt_core::FenceMatcher;
//! use fencefmt_core::process_file;
//! use fencefmt_core::write_result;
//! use std::path::Path;
//!
//! let matcher = FenceMatcher::new("melbi").unwrap();
//! let formatter = ExternalFormatter::default();
//!
//! let result = process_file(Path::new("readme.md"), &matcher, &formatter).unwrap();
//! if result.is_changed() {
//! 	write_result(&result).unwrap();
//! }
//! ```

pub use driver::*;
pub use error::*;
pub use formatter::*;
pub use transform::*;

mod driver;
#[allow(unused_assignments)]
mod error;
mod formatter;
mod transform;
