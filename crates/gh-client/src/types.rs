//! GitHub API data transfer objects
//!
//! These types mirror the JSON the GitHub REST API sends and receives for the
//! handful of endpoints this crate talks to. They are intentionally separate
//! from application domain models to keep this crate pure and reusable.

use serde::{Deserialize, Serialize};

/// The parts of a pull request the comment poster cares about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number (e.g., 123)
    pub number: u64,

    /// HEAD commit SHA
    pub head_sha: String,

    /// PR URL for display
    pub html_url: Option<String>,
}

/// Raw `GET /repos/{owner}/{repo}/pulls/{number}` response, reduced to the
/// fields we read
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PullRequestResponse {
    pub number: u64,
    pub head: GitHead,
    #[serde(default)]
    pub html_url: Option<String>,
}

/// The head of the pull request's branch
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GitHead {
    pub sha: String,
}

impl From<PullRequestResponse> for PullRequest {
    fn from(response: PullRequestResponse) -> Self {
        Self {
            number: response.number,
            head_sha: response.head.sha,
            html_url: response.html_url,
        }
    }
}

/// Body of `POST /repos/{owner}/{repo}/issues/{number}/comments`
///
/// Shows up in the conversation tab of the pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleCommentRequest {
    /// The text message (can contain markdown)
    pub body: String,
}

impl SimpleCommentRequest {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

/// Body of `POST /repos/{owner}/{repo}/pulls/{number}/comments`
///
/// A review comment anchored to a diff position, like a reviewer commenting
/// on a line during code review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewCommentRequest {
    /// The text message (can contain markdown)
    pub body: String,

    /// SHA of the commit the diff was computed for
    pub commit_id: String,

    /// File path relative to the repository root
    pub path: String,

    /// Offset below the first hunk header of the file's diff, not a line number
    pub position: u32,
}

/// The part of a created comment response we keep
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedComment {
    /// GitHub comment ID
    pub id: u64,

    /// Link to the comment
    #[serde(default)]
    pub html_url: Option<String>,
}
