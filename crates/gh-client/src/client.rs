//! GitHub client trait and retry policy definitions
//!
//! This module defines the core `GitHubClient` trait that all client
//! implementations must satisfy, as well as the `RetryPolicy` used by the
//! retrying decorator.

use crate::types::{CreatedComment, PullRequest, ReviewCommentRequest, SimpleCommentRequest};
use async_trait::async_trait;
use std::time::Duration;

/// Retry behavior for GitHub API calls
///
/// A failed call is retried up to `retries` more times. Before retry `n`
/// (1-based) the client sleeps `base_delay × n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Number of retries after the first attempt
    pub retries: u32,

    /// Delay before the first retry, multiplied by the attempt number afterwards
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 3,
            base_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    /// Create a policy with the given retry count and base delay
    pub fn new(retries: u32, base_delay: Duration) -> Self {
        Self {
            retries,
            base_delay,
        }
    }

    /// A policy that never retries
    pub fn none() -> Self {
        Self {
            retries: 0,
            base_delay: Duration::ZERO,
        }
    }

    /// Delay before the given retry attempt (1-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt)
    }

    /// Total number of attempts, including the first one
    pub fn max_attempts(&self) -> u32 {
        self.retries.saturating_add(1)
    }

    /// The delays between attempts, one per retry
    pub fn backoff(&self) -> LinearBackoff {
        LinearBackoff {
            policy: *self,
            attempt: 0,
        }
    }
}

/// Delays of a [`RetryPolicy`]: `base_delay × n` for retry `n`, then exhausted
#[derive(Debug, Clone)]
pub struct LinearBackoff {
    policy: RetryPolicy,
    attempt: u32,
}

impl Iterator for LinearBackoff {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        if self.attempt >= self.policy.retries {
            return None;
        }
        self.attempt += 1;
        Some(self.policy.delay_for(self.attempt))
    }
}

/// GitHub API client trait
///
/// Defines the interface the comment poster needs from the GitHub API.
/// Implementations can be direct (hitting the API) or decorated
/// with retry logic.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow sharing across
/// async tasks and threads.
///
/// # Example
///
/// ```rust,ignore
/// use gh_client::GitHubClient;
///
/// async fn head_sha(client: &dyn GitHubClient) -> anyhow::Result<String> {
///     let pr = client.fetch_pull_request("rust-lang", "rust", 1).await?;
///     Ok(pr.head_sha)
/// }
/// ```
#[async_trait]
pub trait GitHubClient: Send + Sync {
    /// Fetch a single pull request by number
    ///
    /// # Arguments
    ///
    /// * `owner` - Repository owner
    /// * `repo` - Repository name
    /// * `pr_number` - Pull request number
    ///
    /// # Returns
    ///
    /// The pull request details (including the head SHA), or an error if not found.
    async fn fetch_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> anyhow::Result<PullRequest>;

    /// Fetch the unified diff of a pull request
    ///
    /// Requests the pull request with the `application/vnd.github.v3.diff`
    /// media type and returns the raw diff text.
    async fn fetch_pull_request_diff(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> anyhow::Result<String>;

    /// Post a comment to the conversation of a pull request
    ///
    /// Pull requests are issues, so this uses the issue comments endpoint.
    async fn create_issue_comment(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
        comment: &SimpleCommentRequest,
    ) -> anyhow::Result<CreatedComment>;

    /// Create a review comment anchored to a diff position
    ///
    /// # Arguments
    ///
    /// * `owner` - Repository owner
    /// * `repo` - Repository name
    /// * `pr_number` - Pull request number
    /// * `comment` - Body, commit SHA, path and diff position
    ///
    /// # Returns
    ///
    /// The created comment on success, error on failure
    async fn create_review_comment(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
        comment: &ReviewCommentRequest,
    ) -> anyhow::Result<CreatedComment>;
}
