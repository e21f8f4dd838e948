//! Diff data structures representing a pull request's changes.

/// A complete diff for a pull request.
#[derive(Debug, Clone, Default)]
pub struct PullRequestDiff {
    /// All files changed in this PR, in diff order.
    pub files: Vec<FileDiff>,
    /// Total additions across all files.
    pub total_additions: usize,
    /// Total deletions across all files.
    pub total_deletions: usize,
}

impl PullRequestDiff {
    /// Create an empty pull request diff.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recalculate totals from files.
    pub fn recalculate_totals(&mut self) {
        self.total_additions = self.files.iter().map(|f| f.additions).sum();
        self.total_deletions = self.files.iter().map(|f| f.deletions).sum();
    }

    /// Find the file whose post-change path is exactly `path`.
    pub fn file(&self, path: &str) -> Option<&FileDiff> {
        self.files.iter().find(|f| f.to_path == path)
    }
}

/// A single file's diff.
#[derive(Debug, Clone)]
pub struct FileDiff {
    /// Path before the change (`/dev/null` for added files).
    pub from_path: String,
    /// Path after the change (`/dev/null` for deleted files).
    pub to_path: String,
    /// Raw lines preceding the first hunk (`diff --git`, `index`, `---`, `+++`, ...).
    pub header_lines: Vec<String>,
    /// File status.
    pub status: FileStatus,
    /// Change hunks, in the order they appear in the diff.
    pub hunks: Vec<Hunk>,
    /// Number of added lines.
    pub additions: usize,
    /// Number of deleted lines.
    pub deletions: usize,
}

impl FileDiff {
    /// Create a new file diff.
    pub fn new(from_path: impl Into<String>, to_path: impl Into<String>) -> Self {
        let from_path = from_path.into();
        let to_path = to_path.into();
        let status = FileStatus::from_paths(&from_path, &to_path);
        Self {
            from_path,
            to_path,
            header_lines: Vec::new(),
            status,
            hunks: Vec::new(),
            additions: 0,
            deletions: 0,
        }
    }

    /// Recalculate line statistics from hunks.
    pub fn recalculate_stats(&mut self) {
        self.additions = self
            .hunks
            .iter()
            .flat_map(|h| &h.lines)
            .filter(|l| l.kind == LineKind::Addition)
            .count();
        self.deletions = self
            .hunks
            .iter()
            .flat_map(|h| &h.lines)
            .filter(|l| l.kind == LineKind::Deletion)
            .count();
    }
}

/// File status in the diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Added,
    Modified,
    Deleted,
    Renamed,
}

impl FileStatus {
    /// Derive the status from the source and target paths.
    pub fn from_paths(from_path: &str, to_path: &str) -> Self {
        if from_path == DEV_NULL || from_path.is_empty() {
            FileStatus::Added
        } else if to_path == DEV_NULL || to_path.is_empty() {
            FileStatus::Deleted
        } else if from_path != to_path {
            FileStatus::Renamed
        } else {
            FileStatus::Modified
        }
    }}

/// Placeholder path git uses for the missing side of an added or deleted file.
pub const DEV_NULL: &str = "/dev/null";

/// A contiguous region of changes (hunk).
#[derive(Debug, Clone)]
pub struct Hunk {
    /// Header line (e.g., "@@ -10,5 +10,7 @@ fn example()").
    pub header: String,
    /// Old file starting line.
    pub old_start: u32,
    /// Number of lines in old version.
    pub old_count: u32,
    /// New file starting line.
    pub new_start: u32,
    /// Number of lines in new version.
    pub new_count: u32,
    /// Lines in this hunk.
    pub lines: Vec<DiffLine>,
}

impl Hunk {
    /// Create a new hunk with the given header info.
    pub fn new(old_start: u32, old_count: u32, new_start: u32, new_count: u32) -> Self {
        Self {
            header: format!(
                "@@ -{},{} +{},{} @@",
                old_start, old_count, new_start, new_count
            ),
            old_start,
            old_count,
            new_start,
            new_count,
            lines: Vec::new(),
        }
    }

    /// Create a hunk with a function context in header.
    pub fn with_context(
        old_start: u32,
        old_count: u32,
        new_start: u32,
        new_count: u32,
        context: &str,
    ) -> Self {
        Self {
            header: format!(
                "@@ -{},{} +{},{} @@ {}",
                old_start, old_count, new_start, new_count, context
            ),
            ..Self::new(old_start, old_count, new_start, new_count)
        }
    }
}

/// A single line in the diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    /// Line type.
    pub kind: LineKind,
    /// Line content (without leading +/-/ ).
    pub content: String,
    /// Line number in old file (for Context and Deletion).
    pub old_line: Option<u32>,
    /// Line number in new file (for Context and Addition).
    pub new_line: Option<u32>,
}

impl DiffLine {
    /// Create a new context line.
    pub fn context(content: impl Into<String>, old_line: u32, new_line: u32) -> Self {
        Self {
            kind: LineKind::Context,
            content: content.into(),
            old_line: Some(old_line),
            new_line: Some(new_line),
        }
    }

    /// Create a new addition line.
    pub fn addition(content: impl Into<String>, new_line: u32) -> Self {
        Self {
            kind: LineKind::Addition,
            content: content.into(),
            old_line: None,
            new_line: Some(new_line),
        }
    }

    /// Create a new deletion line.
    pub fn deletion(content: impl Into<String>, old_line: u32) -> Self {
        Self {
            kind: LineKind::Deletion,
            content: content.into(),
            old_line: Some(old_line),
            new_line: None,
        }
    }

    /// Create a "\ No newline at end of file" marker.
    pub fn no_newline_marker(content: impl Into<String>) -> Self {
        Self {
            kind: LineKind::NoNewline,
            content: content.into(),
            old_line: None,
            new_line: None,
        }
    }
}

/// Line type in the diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Unchanged line (for context).
    Context,
    /// Added line (+).
    Addition,
    /// Removed line (-).
    Deletion,
    /// "\ No newline at end of file".
    NoNewline,
}
