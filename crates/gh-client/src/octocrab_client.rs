//! Octocrab-based GitHub API client
//!
//! Direct implementation of the `GitHubClient` trait using the octocrab library.
//! This client makes real API calls without any retry behavior.

use crate::client::GitHubClient;
use crate::types::{
    CreatedComment, PullRequest, PullRequestResponse, ReviewCommentRequest, SimpleCommentRequest,
};
use async_trait::async_trait;
use log::debug;
use octocrab::Octocrab;
use std::sync::Arc;

/// Direct GitHub API client using octocrab
///
/// This is the base implementation that makes actual API calls.
/// It can be wrapped by `RetryingGitHubClient` to add retries.
#[derive(Debug, Clone)]
pub struct OctocrabClient {
    octocrab: Arc<Octocrab>,
    base_url: String,
}

impl OctocrabClient {
    /// Create a new client for public GitHub
    pub fn new(octocrab: Arc<Octocrab>) -> Self {
        Self::with_base_url(octocrab, crate::DEFAULT_API_URL)
    }

    /// Create a new client that talks to the given API base URL
    pub fn with_base_url(octocrab: Arc<Octocrab>, base_url: impl Into<String>) -> Self {
        Self {
            octocrab,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// The API base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl GitHubClient for OctocrabClient {
    async fn fetch_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> anyhow::Result<PullRequest> {
        debug!("Fetching PR #{} for {}/{}", pr_number, owner, repo);

        // Raw GET so only the fields we need have to be present
        let route = pull_request_route(owner, repo, pr_number);
        let response: PullRequestResponse = self.octocrab.get(route, None::<&()>).await?;
        let pr = PullRequest::from(response);

        debug!("PR #{} head is {}", pr.number, pr.head_sha);
        Ok(pr)
    }

    async fn fetch_pull_request_diff(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> anyhow::Result<String> {
        debug!("Fetching diff of PR #{} for {}/{}", pr_number, owner, repo);

        let diff = self.octocrab.pulls(owner, repo).get_diff(pr_number).await?;

        debug!("Fetched diff of PR #{} ({} bytes)", pr_number, diff.len());
        Ok(diff)
    }

    async fn create_issue_comment(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
        comment: &SimpleCommentRequest,
    ) -> anyhow::Result<CreatedComment> {
        debug!("Posting comment to PR #{} in {}/{}", pr_number, owner, repo);

        let route = format!("/repos/{}/{}/issues/{}/comments", owner, repo, pr_number);
        let created: CreatedComment = self.octocrab.post(route, Some(comment)).await?;

        debug!("Created comment {} on PR #{}", created.id, pr_number);
        Ok(created)
    }

    async fn create_review_comment(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
        comment: &ReviewCommentRequest,
    ) -> anyhow::Result<CreatedComment> {
        debug!(
            "Posting review comment to PR #{} in {}/{} at {}:{}",
            pr_number, owner, repo, comment.path, comment.position
        );

        let route = format!("{}/comments", pull_request_route(owner, repo, pr_number));
        let created: CreatedComment = self.octocrab.post(route, Some(comment)).await?;

        debug!("Created review comment {} on PR #{}", created.id, pr_number);
        Ok(created)
    }
}

fn pull_request_route(owner: &str, repo: &str, pr_number: u64) -> String {
    format!("/repos/{}/{}/pulls/{}", owner, repo, pr_number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    async fn client_for(server: &Server) -> OctocrabClient {
        let octocrab = Octocrab::builder()
            .personal_token("MockedAccessToken".to_string())
            .base_uri(server.url())
            .unwrap()
            .build()
            .unwrap();
        OctocrabClient::with_base_url(Arc::new(octocrab), server.url())
    }

    #[test]
    fn test_pull_request_route() {
        assert_eq!(
            pull_request_route("octocat", "hello", 7),
            "/repos/octocat/hello/pulls/7"
        );
    }

    #[tokio::test]
    async fn test_fetch_pull_request_reads_head_sha() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/testRepoOwner/testRepoName/pulls/1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "number": 1,
                    "head": { "sha": "6dcb09b5b57875f334f61aebed695e2e4193db5e" }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = client_for(&server).await;
        let pr = client
            .fetch_pull_request("testRepoOwner", "testRepoName", 1)
            .await
            .unwrap();

        assert_eq!(pr.head_sha, "6dcb09b5b57875f334f61aebed695e2e4193db5e");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_issue_comment_posts_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/repos/testRepoOwner/testRepoName/issues/1/comments")
            .match_body(Matcher::Json(json!({ "body": "LGTM" })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(json!({ "id": 11, "body": "LGTM" }).to_string())
            .create_async()
            .await;

        let client = client_for(&server).await;
        let created = client
            .create_issue_comment(
                "testRepoOwner",
                "testRepoName",
                1,
                &SimpleCommentRequest::new("LGTM"),
            )
            .await
            .unwrap();

        assert_eq!(created.id, 11);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_review_comment_posts_position() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/repos/testRepoOwner/testRepoName/pulls/1/comments")
            .match_body(Matcher::Json(json!({
                "body": "Unused import",
                "commit_id": "fakeSHA",
                "path": "src/a.py",
                "position": 2
            })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(json!({ "id": 12 }).to_string())
            .create_async()
            .await;

        let client = client_for(&server).await;
        let comment = ReviewCommentRequest {
            body: "Unused import".to_string(),
            commit_id: "fakeSHA".to_string(),
            path: "src/a.py".to_string(),
            position: 2,
        };
        let created = client
            .create_review_comment("testRepoOwner", "testRepoName", 1, &comment)
            .await
            .unwrap();

        assert_eq!(created.id, 12);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_status_is_an_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/repos/testRepoOwner/testRepoName/pulls/404")
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "message": "Not Found",
                    "documentation_url": "https://docs.github.com/rest"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = client_for(&server).await;
        let result = client
            .fetch_pull_request("testRepoOwner", "testRepoName", 404)
            .await;

        assert!(result.is_err());
    }
}
