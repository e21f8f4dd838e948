//! One invocation from command line to outputs

use crate::cli::{Cli, Invocation};
use crate::orchestrator::{post_comments, PostOptions};
use crate::output::Output;
use gh_client::{build_client, RetryPolicy, RetryingGitHubClient, TokenResolver};
use gh_comment_input::{read_comments_file, InputError};
use gh_pr_comment_config::AppConfig;
use std::path::Path;

/// Validate the command line, load the configuration and post the comments
pub async fn run(cli: Cli) -> Vec<Output> {
    let invocation = match cli.into_invocation() {
        Ok(invocation) => invocation,
        Err(output) => return vec![output],
    };

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load config: {:?}", e);
            return vec![Output::Error(format!("{:#}", e))];
        }
    };

    execute(invocation, &config).await
}

/// Post the comments of a validated invocation
pub async fn execute(invocation: Invocation, config: &AppConfig) -> Vec<Output> {
    let comments = match read_comments_file(&invocation.file) {
        Ok(comments) => comments,
        Err(e) => return vec![input_error(&invocation.file, e)],
    };

    if comments.is_empty() {
        return vec![Output::Successful(format!(
            "No comments to post in {}",
            invocation.file.display()
        ))];
    }

    let api_url = invocation
        .api_url
        .clone()
        .unwrap_or_else(|| config.api_url.clone());
    let token = TokenResolver::new(invocation.token.clone())
        .get_token(&api_url)
        .await;

    let direct = match build_client(&api_url, token) {
        Ok(client) => client,
        Err(e) => {
            log::error!("Failed to create GitHub client: {:?}", e);
            return vec![Output::Error(format!(
                "Could not create a GitHub client for {}: {:#}",
                api_url, e
            ))];
        }
    };
    let client = RetryingGitHubClient::new(
        direct,
        RetryPolicy::new(config.retries, config.retry_delay()),
    );

    let options = PostOptions {
        expected_sha: invocation.expected_sha.clone(),
        max_concurrent_posts: config.max_concurrent_posts,
    };

    post_comments(&client, &invocation.target, &comments, &options).await
}

fn input_error(path: &Path, error: InputError) -> Output {
    log::error!("Failed to read comments from {}: {:?}", path.display(), error);

    match error {
        InputError::FileNotFound(_) | InputError::Io { .. } => Output::Error(error.to_string()),
        other => Output::Error(format!(
            "An error while reading {} has occurred: {}",
            path.display(),
            other
        )),
    }
}
