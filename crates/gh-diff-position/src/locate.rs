//! Translate a post-change file line into GitHub's review comment `position`.
//!
//! GitHub anchors review comments with a `position`: the number of lines
//! below the first `@@` hunk header of a file's diff. Every later hunk header,
//! and every deleted line, occupies a position of its own. The position is
//! therefore an offset into the raw diff text of one file, never a source line
//! number, and it is only valid for the commit the diff was fetched for.

use crate::model::{FileDiff, PullRequestDiff};

/// Lines the file delimiter (`diff --git ...`) occupies in the raw line stream.
pub const FILE_DELIMITER_LINES: usize = 1;

/// Lines every hunk delimiter (`@@ -a,b +c,d @@`) occupies in the raw line stream.
pub const HUNK_DELIMITER_LINES: usize = 1;

/// A GitHub review comment position within one file's diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DiffPosition(pub u32);

impl DiffPosition {
    pub fn get(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for DiffPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of locating a line in a diff.
///
/// Neither "not in diff" variant is an error: both mean the comment has to
/// fall back to a plain conversation comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineLocation {
    /// The line is part of the diff at the given position.
    Anchored(DiffPosition),
    /// No file in the diff has the requested post-change path.
    FileNotInDiff,
    /// The file is in the diff, but the line is neither added nor shown as context.
    LineNotInDiff,
}

impl LineLocation {
    pub fn position(self) -> Option<DiffPosition> {
        match self {
            LineLocation::Anchored(position) => Some(position),
            LineLocation::FileNotInDiff | LineLocation::LineNotInDiff => None,
        }
    }
}

/// Locate `to_line` of `file_path` in the diff.
///
/// The file is matched on its post-change path, exactly.
pub fn locate(diff: &PullRequestDiff, file_path: &str, to_line: u32) -> LineLocation {
    match diff.file(file_path) {
        Some(file) => locate_in_file(file, to_line),
        None => LineLocation::FileNotInDiff,
    }
}

/// Locate `to_line` within a single file's diff.
pub fn locate_in_file(file: &FileDiff, to_line: u32) -> LineLocation {
    match raw_line_index(file, to_line) {
        Some(raw) => {
            let position =
                raw - FILE_DELIMITER_LINES - file.header_lines.len() - HUNK_DELIMITER_LINES;
            match u32::try_from(position) {
                Ok(position) => LineLocation::Anchored(DiffPosition(position)),
                Err(_) => LineLocation::LineNotInDiff,
            }
        }
        None => LineLocation::LineNotInDiff,
    }
}

/// 1-based index of the matching line in the file's raw diff text, counting the
/// file delimiter, the header lines, every hunk header and every hunk line.
fn raw_line_index(file: &FileDiff, to_line: u32) -> Option<usize> {
    let mut raw = FILE_DELIMITER_LINES + file.header_lines.len();

    for hunk in &file.hunks {
        raw += HUNK_DELIMITER_LINES;
        for line in &hunk.lines {
            raw += 1;
            // Deletions carry no new_line and can never match
            if line.new_line == Some(to_line) {
                return Some(raw);
            }
        }
    }

    None
}
