//! # gh-diff-position
//!
//! Unified diff model for GitHub pull requests and the locator that turns a
//! `(path, line)` pair of the post-change file into the `position` GitHub's
//! review comment API expects.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gh_diff_position::{locate, parse_unified_diff, LineLocation};
//!
//! let diff = parse_unified_diff(&diff_text)?;
//! match locate(&diff, "src/main.rs", 42) {
//!     LineLocation::Anchored(position) => println!("position {}", position),
//!     LineLocation::FileNotInDiff | LineLocation::LineNotInDiff => {
//!         // post a plain conversation comment instead
//!     }
//! }
//! ```

pub mod locate;
pub mod model;
pub mod parser;

pub use locate::{
    locate, locate_in_file, DiffPosition, LineLocation, FILE_DELIMITER_LINES,
    HUNK_DELIMITER_LINES,
};
pub use model::{DiffLine, FileDiff, FileStatus, Hunk, LineKind, PullRequestDiff, DEV_NULL};
pub use parser::{parse_unified_diff, ParseError};
