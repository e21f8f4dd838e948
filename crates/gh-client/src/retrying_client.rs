//! Retrying GitHub API client (decorator pattern)
//!
//! Wraps any `GitHubClient` implementation to retry failed calls with a
//! linearly growing backoff, scheduled by `backon`.

use crate::client::{GitHubClient, RetryPolicy};
use crate::types::{CreatedComment, PullRequest, ReviewCommentRequest, SimpleCommentRequest};
use anyhow::Context;
use async_trait::async_trait;
use backon::Retryable;
use log::warn;
use std::future::Future;
use std::time::Duration;

/// Retrying GitHub API client using the decorator pattern
///
/// Wraps an inner `GitHubClient` and retries every failing call according to
/// the configured `RetryPolicy`. Once retries are exhausted the last error is
/// returned, annotated with the number of attempts.
///
/// # Example
///
/// ```rust,ignore
/// use gh_client::{OctocrabClient, RetryPolicy, RetryingGitHubClient};
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// let octocrab = Arc::new(octocrab::Octocrab::builder().build().unwrap());
/// let inner = OctocrabClient::new(octocrab);
///
/// let client = RetryingGitHubClient::new(inner, RetryPolicy::new(3, Duration::from_millis(500)));
/// ```
#[derive(Debug, Clone)]
pub struct RetryingGitHubClient<C: GitHubClient> {
    inner: C,
    policy: RetryPolicy,
}

impl<C: GitHubClient> RetryingGitHubClient<C> {
    /// Create a new retrying client
    ///
    /// # Arguments
    ///
    /// * `inner` - The inner client to delegate API calls to
    /// * `policy` - How often and how patiently to retry
    pub fn new(inner: C, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    /// Get the retry policy
    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Run `call` until it succeeds or the policy is exhausted
    async fn with_retry<T, F, Fut>(&self, what: &str, call: F) -> anyhow::Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = anyhow::Result<T>>,
    {
        call.retry(self.policy.backoff())
            .notify(|e: &anyhow::Error, delay: Duration| {
                warn!("{} failed: {:#}, retrying in {:?}", what, e, delay);
            })
            .await
            .with_context(|| {
                format!(
                    "{} failed after {} attempts",
                    what,
                    self.policy.max_attempts()
                )
            })
    }
}

#[async_trait]
impl<C: GitHubClient> GitHubClient for RetryingGitHubClient<C> {
    async fn fetch_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> anyhow::Result<PullRequest> {
        self.with_retry("Fetching pull request", || {
            self.inner.fetch_pull_request(owner, repo, pr_number)
        })
        .await
    }

    async fn fetch_pull_request_diff(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> anyhow::Result<String> {
        self.with_retry("Fetching pull request diff", || {
            self.inner.fetch_pull_request_diff(owner, repo, pr_number)
        })
        .await
    }

    async fn create_issue_comment(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
        comment: &SimpleCommentRequest,
    ) -> anyhow::Result<CreatedComment> {
        self.with_retry("Posting comment", || {
            self.inner
                .create_issue_comment(owner, repo, pr_number, comment)
        })
        .await
    }

    async fn create_review_comment(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
        comment: &ReviewCommentRequest,
    ) -> anyhow::Result<CreatedComment> {
        self.with_retry("Posting review comment", || {
            self.inner
                .create_review_comment(owner, repo, pr_number, comment)
        })
        .await
    }
}
