//! Command line interface

use crate::orchestrator::PullRequestTarget;
use crate::output::Output;
use clap::Parser;
use std::path::PathBuf;

// Required flags are optional for clap and checked in `into_invocation`, so a
// missing one is reported as a regular error output.

/// Post review comments from an XML file to a GitHub pull request
#[derive(Parser, Debug, Default)]
#[command(name = "gh-pr-comment")]
#[command(version)]
pub struct Cli {
    /// XML file with the comments to post
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Owner of the GitHub repository
    #[arg(short, long)]
    pub owner: Option<String>,

    /// Name of the GitHub repository
    #[arg(short, long)]
    pub repository: Option<String>,

    /// Number of the pull request
    #[arg(short, long)]
    pub id: Option<String>,

    /// SHA of the commit the comments were produced for. Nothing is posted if
    /// the pull request head has moved on.
    #[arg(short, long)]
    pub sha: Option<String>,

    /// GitHub token, defaults to GITHUB_TOKEN, GH_TOKEN or `gh auth token`
    #[arg(short, long)]
    pub token: Option<String>,

    /// GitHub REST API base URL, e.g. for GitHub Enterprise
    #[arg(long)]
    pub api_url: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// A validated command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub file: PathBuf,
    pub target: PullRequestTarget,
    pub expected_sha: Option<String>,
    pub token: Option<String>,
    pub api_url: Option<String>,
}

impl Cli {
    /// Check the required flags, reporting the first missing one
    pub fn into_invocation(self) -> Result<Invocation, Output> {
        let file = self.file.ok_or_else(|| {
            missing("The path to the file which content should be posted is not set", "file")
        })?;
        let owner = required(self.owner, "GitHub owner must be set", "owner")?;
        let repo = required(self.repository, "GitHub repository name must be set", "repository")?;
        let id = required(
            self.id,
            "The GitHub id of the pull request / issue must be set",
            "id",
        )?;
        let number = id
            .trim()
            .parse::<u64>()
            .map_err(|_| Output::Error("Pull-request id is not a valid number".to_string()))?;

        Ok(Invocation {
            file,
            target: PullRequestTarget {
                owner,
                repo,
                number,
            },
            expected_sha: non_empty(self.sha),
            token: non_empty(self.token),
            api_url: non_empty(self.api_url),
        })
    }
}

fn required(value: Option<String>, message: &str, flag: &str) -> Result<String, Output> {
    non_empty(value).ok_or_else(|| missing(message, flag))
}

fn missing(message: &str, flag: &str) -> Output {
    Output::Error(format!("{}. Use --{} option", message, flag))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
