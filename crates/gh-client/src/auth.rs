//! Token resolution and client construction
//!
//! Builds the octocrab instance for a given API base URL, authenticated with
//! the first token that can be found.

use crate::{OctocrabClient, DEFAULT_API_URL};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use octocrab::Octocrab;
use std::sync::Arc;

/// Resolves the GitHub token to authenticate with
///
/// Tries multiple sources in order:
/// 1. An explicitly passed token (e.g. from the command line)
/// 2. `GITHUB_TOKEN` or `GH_TOKEN`
/// 3. `gh auth token --hostname {host}` command
#[derive(Debug, Clone)]
pub struct TokenResolver {
    /// Token passed by the caller, wins over everything else
    explicit_token: Option<String>,
    /// Cached default token from GITHUB_TOKEN/GH_TOKEN
    default_token: Option<String>,
}

impl TokenResolver {
    /// Create a new token resolver
    pub fn new(explicit_token: Option<String>) -> Self {
        let default_token = std::env::var("GITHUB_TOKEN")
            .or_else(|_| std::env::var("GH_TOKEN"))
            .ok()
            .filter(|token| !token.trim().is_empty());

        Self {
            explicit_token: explicit_token.filter(|token| !token.trim().is_empty()),
            default_token,
        }
    }

    /// Get a token for the host behind `api_url`, if any source provides one
    pub async fn get_token(&self, api_url: &str) -> Option<String> {
        if let Some(ref token) = self.explicit_token {
            debug!("Using token passed on the command line");
            return Some(token.clone());
        }

        if let Some(ref token) = self.default_token {
            debug!("Using default token (GITHUB_TOKEN/GH_TOKEN)");
            return Some(token.clone());
        }

        let host = host_of(api_url);
        debug!("Trying gh auth token for host {}", host);
        let output = tokio::process::Command::new("gh")
            .args(["auth", "token", "--hostname", &host])
            .output()
            .await;

        match output {
            Ok(output) if output.status.success() => {
                let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if token.is_empty() {
                    None
                } else {
                    debug!("Using token from gh CLI for host {}", host);
                    Some(token)
                }
            }
            Ok(_) => None,
            Err(e) => {
                debug!("Could not run 'gh auth token': {}", e);
                None
            }
        }
    }
}

/// The GitHub host for an API base URL
///
/// `https://api.github.com` maps to `github.com`, enterprise URLs such as
/// `https://ghe.example.com/api/v3` map to their host.
pub fn host_of(api_url: &str) -> String {
    let without_scheme = api_url
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(api_url);
    let host = without_scheme.split('/').next().unwrap_or(without_scheme);

    match host.strip_prefix("api.") {
        Some(stripped) => stripped.to_string(),
        None => host.to_string(),
    }
}

/// Build a direct client for `api_url`
///
/// Without a token the client is unauthenticated, which only works for
/// reading public repositories.
pub fn build_client(api_url: &str, token: Option<String>) -> Result<OctocrabClient> {
    info!("Creating GitHub client for {}", api_url);

    let mut builder = Octocrab::builder();
    match token {
        Some(token) => builder = builder.personal_token(token),
        None => warn!("No GitHub token found, posting comments will most likely fail"),
    }

    if api_url.trim_end_matches('/') != DEFAULT_API_URL {
        builder = builder
            .base_uri(api_url)
            .with_context(|| format!("Failed to set base URI {}", api_url))?;
    }

    let octocrab = builder.build().context("Failed to build Octocrab client")?;
    Ok(OctocrabClient::with_base_url(Arc::new(octocrab), api_url))
}
