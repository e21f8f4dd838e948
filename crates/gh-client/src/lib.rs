//! GitHub API client with retry support
//!
//! This crate provides a trait-based GitHub API client covering what is
//! needed to post comments on a pull request. The design follows the
//! decorator pattern, allowing retry behavior to be composed with the base
//! client.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │              GitHubClient trait                  │
//! │  - fetch_pull_request()                          │
//! │  - fetch_pull_request_diff()                     │
//! │  - create_issue_comment()                        │
//! │  - create_review_comment()                       │
//! └─────────────────────────────────────────────────┘
//!                        │
//!        ┌───────────────┴───────────────┐
//!        ▼                               ▼
//! ┌─────────────────┐         ┌──────────────────────┐
//! │ OctocrabClient  │         │ RetryingGitHubClient │
//! │ (direct API)    │◄────────│ (decorator)          │
//! └─────────────────┘         └──────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use gh_client::{build_client, GitHubClient, RetryPolicy, RetryingGitHubClient};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let direct = build_client("https://api.github.com", Some("token".to_string()))?;
//! let client = RetryingGitHubClient::new(direct, RetryPolicy::default());
//!
//! let pr = client.fetch_pull_request("owner", "repo", 1).await?;
//! println!("head is at {}", pr.head_sha);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod octocrab_client;
pub mod retrying_client;
pub mod types;

/// Default GitHub REST API base URL (public GitHub)
pub const DEFAULT_API_URL: &str = "https://api.github.com";

pub use auth::{build_client, host_of, TokenResolver};
pub use client::{GitHubClient, LinearBackoff, RetryPolicy};
pub use octocrab_client::OctocrabClient;
pub use retrying_client::RetryingGitHubClient;
pub use types::{CreatedComment, PullRequest, ReviewCommentRequest, SimpleCommentRequest};
