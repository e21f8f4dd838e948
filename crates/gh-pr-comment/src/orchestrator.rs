//! Posting comments to a pull request
//!
//! Fetches the pull request head and, when line comments are present, its
//! diff at the same time. A missing pull request or a stale head stops the
//! run before anything is posted, and an unfinished diff fetch is dropped.
//! Afterwards every comment is resolved against the shared diff and
//! posted concurrently; outputs keep the order of the input comments.

use crate::output::Output;
use crate::resolver::{resolve, Resolution};
use anyhow::Context;
use futures::stream::{self, StreamExt};
use gh_client::{CreatedComment, GitHubClient};
use gh_comment_input::Comment;
use gh_diff_position::{parse_unified_diff, PullRequestDiff};
use std::fmt;

/// The pull request comments are posted to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestTarget {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

impl fmt::Display for PullRequestTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostOptions {
    /// Head SHA the comments were produced for. Posting is skipped when the
    /// pull request has moved on.
    pub expected_sha: Option<String>,

    /// Upper bound of comments posted at the same time
    pub max_concurrent_posts: usize,
}

impl Default for PostOptions {
    fn default() -> Self {
        Self {
            expected_sha: None,
            max_concurrent_posts: 4,
        }
    }
}

/// Post all `comments` and return one output per comment, in input order
///
/// Returns a single output instead when the pull request can not be loaded or
/// its head differs from the expected SHA.
pub async fn post_comments(
    client: &dyn GitHubClient,
    target: &PullRequestTarget,
    comments: &[Comment],
    options: &PostOptions,
) -> Vec<Output> {
    let needs_diff = comments.iter().any(Comment::is_code_line);

    let fetch = client.fetch_pull_request(&target.owner, &target.repo, target.number);
    let diff = async {
        if needs_diff {
            Some(load_diff(client, target).await)
        } else {
            None
        }
    };
    tokio::pin!(fetch, diff);

    // Drive the diff while waiting for the head, but never wait on it here
    let mut loaded = None;
    let pull_request = loop {
        tokio::select! {
            pull_request = &mut fetch => break pull_request,
            result = &mut diff, if loaded.is_none() => loaded = Some(result),
        }
    };

    let pull_request = match pull_request {
        Ok(pull_request) => pull_request,
        Err(e) => {
            log::error!("Failed to load pull request {}: {:?}", target, e);
            return vec![Output::Error(format!(
                "Could not load the pull request {} from GitHub web api",
                target
            ))];
        }
    };

    if let Some(expected_sha) = &options.expected_sha {
        if *expected_sha != pull_request.head_sha {
            log::info!("Head of {} moved to {}, skipping", target, pull_request.head_sha);
            return vec![Output::Successful(format!(
                "Skipping posting comments because the SHA of the head of this branch differs \
                 from the SHA of the pull request. Usually this means that the pull request has \
                 been updated before this job (posting comments) has been started. Current SHA \
                 of this branch is {} but remote pull requests SHA is {}",
                expected_sha, pull_request.head_sha
            ))];
        }
    }

    let diff = match loaded {
        Some(result) => result,
        None => diff.await,
    };
    let diff = match diff {
        Some(Ok(diff)) => Some(diff),
        Some(Err(e)) => {
            log::error!("Failed to load diff of {}: {:?}", target, e);
            None
        }
        None => None,
    };
    let commit_sha = options
        .expected_sha
        .as_deref()
        .unwrap_or(&pull_request.head_sha);

    log::info!("Posting {} comments to {}", comments.len(), target);

    stream::iter(comments.iter().map(|comment| {
        let resolution = resolve(comment, diff.as_ref(), commit_sha);
        post(client, target, comment, resolution)
    }))
    .buffered(options.max_concurrent_posts.max(1))
    .collect::<Vec<_>>()
    .await
}

async fn load_diff(
    client: &dyn GitHubClient,
    target: &PullRequestTarget,
) -> anyhow::Result<PullRequestDiff> {
    let text = client
        .fetch_pull_request_diff(&target.owner, &target.repo, target.number)
        .await?;
    let diff = parse_unified_diff(&text).context("Failed to parse pull request diff")?;
    log::debug!(
        "Diff of {} touches {} files (+{} -{})",
        target,
        diff.files.len(),
        diff.total_additions,
        diff.total_deletions
    );
    Ok(diff)
}

async fn post(
    client: &dyn GitHubClient,
    target: &PullRequestTarget,
    comment: &Comment,
    resolution: Resolution,
) -> Output {
    let result = match resolution {
        Resolution::Failed(output) => return output,
        Resolution::Simple(request) => {
            client
                .create_issue_comment(&target.owner, &target.repo, target.number, &request)
                .await
        }
        Resolution::Anchored(request) => {
            client
                .create_review_comment(&target.owner, &target.repo, target.number, &request)
                .await
        }
    };

    match result {
        Ok(created) => Output::Successful(success_message(target, comment, &created)),
        Err(e) => {
            log::error!("Failed to post comment to {}: {:?}", target, e);
            Output::Error(format!(
                "An error has occurred while trying to post {} to {}",
                describe(comment),
                target
            ))
        }
    }
}

fn success_message(target: &PullRequestTarget, comment: &Comment, created: &CreatedComment) -> String {
    let location = created
        .html_url
        .clone()
        .unwrap_or_else(|| target.to_string());
    format!("Successfully posted {} to {}", describe(comment), location)
}

fn describe(comment: &Comment) -> String {
    match comment {
        Comment::Simple { .. } => "simple comment".to_string(),
        Comment::CodeLine {
            file_path,
            line_number,
            ..
        } => format!("comment on {}:{}", file_path, line_number),
    }
}
