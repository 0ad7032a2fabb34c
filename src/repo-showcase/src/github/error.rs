//! Upstream fetch error types.

use thiserror::Error;

/// Errors that can occur while talking to the GitHub API.
#[derive(Debug, Error)]
pub enum FetchError {
    /// GitHub API error.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),

    /// The request did not complete in time.
    #[error("Request for {resource} timed out after {seconds} seconds")]
    Timeout { resource: String, seconds: u64 },

    /// README payload had no decodable text.
    #[error("README for {repo} has no decodable content")]
    EmptyReadme { repo: String },
}
