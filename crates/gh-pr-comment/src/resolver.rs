//! Turns an input comment into the request that will be posted
//!
//! Line comments are anchored through the pull request diff. When the file
//! or line is not part of the diff the comment is still posted, as a plain
//! conversation comment with a note in front of it.

use crate::output::Output;
use gh_client::{ReviewCommentRequest, SimpleCommentRequest};
use gh_comment_input::Comment;
use gh_diff_position::{locate, LineLocation, PullRequestDiff};

/// What to post for one comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Post to the conversation
    Simple(SimpleCommentRequest),
    /// Post as review comment at a diff position
    Anchored(ReviewCommentRequest),
    /// Nothing can be posted
    Failed(Output),
}

/// Resolve `comment` against the pull request diff
///
/// `diff` is `None` when it could not be fetched or parsed. Line comments
/// then fail instead of silently losing their anchor.
pub fn resolve(comment: &Comment, diff: Option<&PullRequestDiff>, commit_sha: &str) -> Resolution {
    match comment {
        Comment::Simple { text } => Resolution::Simple(SimpleCommentRequest::new(text.clone())),
        Comment::CodeLine {
            file_path,
            line_number,
            text,
        } => {
            let Some(diff) = diff else {
                return Resolution::Failed(Output::Error(format!(
                    "Could not load the diff for the pull request from GitHub web api, \
                     comment on {}:{} was not posted",
                    file_path, line_number
                )));
            };

            match locate(diff, file_path, *line_number) {
                LineLocation::Anchored(position) => {
                    log::debug!("{}:{} is at diff position {}", file_path, line_number, position);
                    Resolution::Anchored(ReviewCommentRequest {
                        body: text.clone(),
                        commit_id: commit_sha.to_string(),
                        path: file_path.clone(),
                        position: position.get(),
                    })
                }
                not_found => {
                    log::info!(
                        "{}:{} can not be anchored ({:?}), posting as simple comment",
                        file_path,
                        line_number,
                        not_found
                    );
                    Resolution::Simple(SimpleCommentRequest::new(fallback_body(
                        file_path,
                        *line_number,
                        text,
                        not_found,
                    )))
                }
            }
        }
    }
}

/// Body of a line comment posted to the conversation instead
fn fallback_body(file_path: &str, line_number: u32, text: &str, location: LineLocation) -> String {
    let reason = match location {
        LineLocation::FileNotInDiff => "the file is not changed by this pull request",
        _ => "the line is not part of the diff of this pull request",
    };

    format!(
        "> Comment on `{}` line {}: {}.\n\n{}",
        file_path, line_number, reason, text
    )
}
