//! Parse unified diff format (as returned by GitHub API).

use crate::model::{DiffLine, FileDiff, Hunk, PullRequestDiff, DEV_NULL};
use log::{debug, warn};
use thiserror::Error;
use unidiff::{Hunk as UnidiffHunk, Line as UnidiffLine, PatchSet, PatchedFile};

/// Errors that can occur during diff parsing.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Failed to parse diff: {0}")]
    ParseFailed(String),
    #[error("Invalid line number in diff: {0}")]
    InvalidLineNumber(usize),
}

/// Parse a unified diff string into a structured `PullRequestDiff`.
///
/// # Arguments
/// * `diff_text` - The unified diff text (from GitHub API or git diff)
///
/// # Example
/// ```
/// let diff = gh_diff_position::parse_unified_diff(
///     "--- a/a.txt\n+++ b/a.txt\n@@ -1,1 +1,2 @@\n a\n+b\n",
/// )?;
/// assert_eq!(diff.files[0].to_path, "a.txt");
/// # Ok::<(), gh_diff_position::ParseError>(())
/// ```
pub fn parse_unified_diff(diff_text: &str) -> Result<PullRequestDiff, ParseError> {
    let mut patch_set = PatchSet::new();
    patch_set
        .parse(diff_text)
        .map_err(|e| ParseError::ParseFailed(e.to_string()))?;

    let headers = split_file_headers(diff_text);
    let files = patch_set.files();
    let headers_match = headers.len() == files.len();
    if !headers_match {
        warn!(
            "Found {} file headers but {} patched files, synthesizing headers",
            headers.len(),
            files.len()
        );
    }

    let mut diff = PullRequestDiff::new();
    for (index, patched_file) in files.iter().enumerate() {
        let mut file_diff = parse_patched_file(patched_file)?;
        file_diff.header_lines = match headers.get(index) {
            Some(header) if headers_match => header.clone(),
            _ => vec![
                format!("--- {}", patched_file.source_file),
                format!("+++ {}", patched_file.target_file),
            ],
        };
        diff.files.push(file_diff);
    }

    diff.recalculate_totals();
    debug!(
        "Parsed diff with {} files (+{} -{})",
        diff.files.len(),
        diff.total_additions,
        diff.total_deletions
    );
    Ok(diff)
}

fn parse_patched_file(file: &PatchedFile) -> Result<FileDiff, ParseError> {
    let source = clean_path(&file.source_file);
    let target = clean_path(&file.target_file);

    let mut file_diff = FileDiff::new(source, target);
    for hunk in file.hunks() {
        file_diff.hunks.push(parse_hunk(hunk)?);
    }

    file_diff.recalculate_stats();
    Ok(file_diff)
}

fn parse_hunk(hunk: &UnidiffHunk) -> Result<Hunk, ParseError> {
    let old_start = to_u32(hunk.source_start)?;
    let old_count = to_u32(hunk.source_length)?;
    let new_start = to_u32(hunk.target_start)?;
    let new_count = to_u32(hunk.target_length)?;

    let header = hunk.section_header.trim();
    let mut parsed = if header.is_empty() {
        Hunk::new(old_start, old_count, new_start, new_count)
    } else {
        Hunk::with_context(old_start, old_count, new_start, new_count, header)
    };

    for line in hunk.lines() {
        parsed.lines.push(parse_line(line)?);
    }

    Ok(parsed)
}

fn parse_line(line: &UnidiffLine) -> Result<DiffLine, ParseError> {
    let content = line.value.to_string();
    let old_line = line.source_line_no.map(to_u32).transpose()?;
    let new_line = line.target_line_no.map(to_u32).transpose()?;

    let parsed = match (line.line_type.as_str(), old_line, new_line) {
        ("+", _, Some(new)) => DiffLine::addition(content, new),
        ("-", Some(old), _) => DiffLine::deletion(content, old),
        ("\\", _, _) => DiffLine::no_newline_marker(content),
        (_, Some(old), Some(new)) => DiffLine::context(content, old, new),
        // Anything else carries no usable line numbers
        _ => DiffLine::no_newline_marker(content),
    };
    Ok(parsed)
}

fn to_u32(value: usize) -> Result<u32, ParseError> {
    u32::try_from(value).map_err(|_| ParseError::InvalidLineNumber(value))
}

/// Collect the raw header lines of every file block that carries a `+++` line.
///
/// A block starts at `diff --git` (or at a `---`/`+++` pair for plain unified
/// diffs) and its header ends at the first `@@` line. Blocks without a `+++`
/// line (binary files, pure renames) never produce a patched file, so they
/// are dropped to stay aligned with the parsed files.
fn split_file_headers(diff_text: &str) -> Vec<Vec<String>> {
    let git_format = diff_text.lines().any(|l| l.starts_with("diff --git "));
    let lines: Vec<&str> = diff_text.lines().collect();

    let mut blocks: Vec<Vec<String>> = Vec::new();
    let mut current: Option<Vec<String>> = None;
    let mut in_hunks = false;

    for (index, line) in lines.iter().enumerate() {
        let starts_block = if git_format {
            line.starts_with("diff --git ")
        } else {
            line.starts_with("--- ")
                && lines
                    .get(index + 1)
                    .is_some_and(|next| next.starts_with("+++ "))
                && (current.is_none() || in_hunks)
        };

        if starts_block {
            blocks.extend(current.take());
            current = Some(vec![line.to_string()]);
            in_hunks = false;
            continue;
        }

        if let Some(header) = current.as_mut() {
            if in_hunks {
                continue;
            }
            if line.starts_with("@@") {
                in_hunks = true;
            } else {
                header.push(line.to_string());
            }
        }
    }
    blocks.extend(current);

    blocks
        .into_iter()
        .filter(|header| header.iter().any(|l| l.starts_with("+++ ")))
        .collect()
}

/// Clean the path by removing a/b prefixes from git diff output.
fn clean_path(path: &str) -> String {
    let path = path.trim();

    if path == DEV_NULL {
        return path.to_string();
    }
    if let Some(stripped) = path.strip_prefix("a/") {
        return stripped.to_string();
    }
    if let Some(stripped) = path.strip_prefix("b/") {
        return stripped.to_string();
    }

    path.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FileStatus, LineKind};
    use pretty_assertions::assert_eq;

    const SAMPLE_DIFF: &str = "diff --git a/src/main.rs b/src/main.rs
index abc123..def456 100644
--- a/src/main.rs
+++ b/src/main.rs
@@ -1,3 +1,4 @@ fn main()
 fn main() {
     println!(\"Hello\");
+    println!(\"World\");
 }
diff --git a/src/lib.rs b/src/lib.rs
index 111222..333444 100644
--- a/src/lib.rs
+++ b/src/lib.rs
@@ -10,5 +10,4 @@ impl Foo {
 impl Foo {
     fn bar(&self) {
-        // old comment
         self.do_thing();
     }
";

    #[test]
    fn test_parse_simple_diff() {
        let diff = parse_unified_diff(SAMPLE_DIFF).unwrap();

        assert_eq!(diff.files.len(), 2);
        assert_eq!(diff.total_additions, 1);
        assert_eq!(diff.total_deletions, 1);

        let file1 = &diff.files[0];
        assert_eq!(file1.to_path, "src/main.rs");
        assert_eq!(file1.from_path, "src/main.rs");
        assert_eq!(file1.status, FileStatus::Modified);
        assert_eq!(file1.additions, 1);
        assert_eq!(file1.deletions, 0);
        assert_eq!(file1.hunks.len(), 1);

        let hunk = &file1.hunks[0];
        assert_eq!(hunk.old_start, 1);
        assert_eq!(hunk.new_start, 1);
        assert_eq!(hunk.new_count, 4);
        assert!(hunk.header.contains("fn main()"));
        assert_eq!(hunk.lines.len(), 4);

        let file2 = &diff.files[1];
        assert_eq!(file2.to_path, "src/lib.rs");
        assert_eq!(file2.additions, 0);
        assert_eq!(file2.deletions, 1);
    }

    #[test]
    fn test_header_lines_are_captured_per_file() {
        let diff = parse_unified_diff(SAMPLE_DIFF).unwrap();

        assert_eq!(
            diff.files[0].header_lines,
            vec![
                "diff --git a/src/main.rs b/src/main.rs",
                "index abc123..def456 100644",
                "--- a/src/main.rs",
                "+++ b/src/main.rs",
            ]
        );
        assert_eq!(diff.files[1].header_lines.len(), 4);
        assert_eq!(
            diff.files[1].header_lines[0],
            "diff --git a/src/lib.rs b/src/lib.rs"
        );
    }

    #[test]
    fn test_parse_new_file() {
        let diff = "diff --git a/new_file.rs b/new_file.rs
new file mode 100644
index 0000000..abc1234
--- /dev/null
+++ b/new_file.rs
@@ -0,0 +1,3 @@
+fn new_function() {
+    // new code
+}
";

        let parsed = parse_unified_diff(diff).unwrap();
        assert_eq!(parsed.files.len(), 1);
        assert_eq!(parsed.files[0].status, FileStatus::Added);
        assert_eq!(parsed.files[0].from_path, DEV_NULL);
        assert_eq!(parsed.files[0].additions, 3);
        assert_eq!(parsed.files[0].header_lines.len(), 5);
    }

    #[test]
    fn test_parse_deleted_file() {
        let diff = "diff --git a/old_file.rs b/old_file.rs
deleted file mode 100644
index abc1234..0000000
--- a/old_file.rs
+++ /dev/null
@@ -1,3 +0,0 @@
-fn old_function() {
-    // old code
-}
";

        let parsed = parse_unified_diff(diff).unwrap();
        assert_eq!(parsed.files.len(), 1);
        assert_eq!(parsed.files[0].status, FileStatus::Deleted);
        assert_eq!(parsed.files[0].to_path, DEV_NULL);
        assert_eq!(parsed.files[0].deletions, 3);
    }

    #[test]
    fn test_parse_renamed_file() {
        let diff = "diff --git a/old_name.rs b/new_name.rs
similarity index 95%
rename from old_name.rs
rename to new_name.rs
index abc123..def456 100644
--- a/old_name.rs
+++ b/new_name.rs
@@ -1,3 +1,3 @@
 fn example() {
-    // old
+    // new
 }
";

        let parsed = parse_unified_diff(diff).unwrap();
        assert_eq!(parsed.files.len(), 1);

        let file = &parsed.files[0];
        assert_eq!(file.to_path, "new_name.rs");
        assert_eq!(file.from_path, "old_name.rs");
        assert_eq!(file.status, FileStatus::Renamed);
        assert_eq!(file.header_lines.len(), 7);
    }

    #[test]
    fn test_binary_block_is_skipped_in_headers() {
        let diff = "diff --git a/logo.png b/logo.png
index 1111111..2222222 100644
Binary files a/logo.png and b/logo.png differ
diff --git a/README.md b/README.md
index 3333333..4444444 100644
--- a/README.md
+++ b/README.md
@@ -1,2 +1,2 @@
 # Title
-old
+new
";

        let headers = split_file_headers(diff);
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0][0], "diff --git a/README.md b/README.md");
    }

    #[test]
    fn test_plain_unified_diff_headers() {
        let diff = "--- a/one.txt
+++ b/one.txt
@@ -1,1 +1,2 @@
 one
+two
--- a/two.txt
+++ b/two.txt
@@ -1,1 +1,1 @@
-a
+b
";

        let headers = split_file_headers(diff);
        assert_eq!(
            headers,
            vec![
                vec!["--- a/one.txt".to_string(), "+++ b/one.txt".to_string()],
                vec!["--- a/two.txt".to_string(), "+++ b/two.txt".to_string()],
            ]
        );
    }

    #[test]
    fn test_clean_path() {
        assert_eq!(clean_path("a/src/main.rs"), "src/main.rs");
        assert_eq!(clean_path("b/src/main.rs"), "src/main.rs");
        assert_eq!(clean_path("src/main.rs"), "src/main.rs");
        assert_eq!(clean_path("/dev/null"), "/dev/null");
    }

    #[test]
    fn test_line_numbers() {
        let diff = parse_unified_diff(SAMPLE_DIFF).unwrap();
        let hunk = &diff.files[0].hunks[0];

        assert_eq!(hunk.lines[0].kind, LineKind::Context);
        assert_eq!(hunk.lines[0].old_line, Some(1));
        assert_eq!(hunk.lines[0].new_line, Some(1));

        let addition = hunk
            .lines
            .iter()
            .find(|l| l.kind == LineKind::Addition)
            .unwrap();
        assert!(addition.old_line.is_none());
        assert_eq!(addition.new_line, Some(3));

        let deletion = &diff.files[1].hunks[0].lines[2];
        assert_eq!(deletion.kind, LineKind::Deletion);
        assert_eq!(deletion.old_line, Some(12));
        assert_eq!(deletion.new_line, None);
    }
}
