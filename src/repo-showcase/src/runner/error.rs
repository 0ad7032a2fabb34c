//! Runner error types.

use crate::github::FetchError;

/// Errors that abort a portfolio load.
///
/// Per-repository enrichment failures never show up here; they degrade the
/// affected project card instead.
#[derive(Debug, thiserror::Error)]
pub enum ShowcaseError {
    /// Configuration loading errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// GitHub API client initialization errors.
    #[error("Failed to build GitHub client: {0}")]
    Client(#[from] octocrab::Error),

    /// The profile could not be fetched.
    #[error("Failed to load profile: {0}")]
    Profile(#[source] FetchError),

    /// The repository list could not be fetched.
    #[error("Failed to load repository list: {0}")]
    RepositoryList(#[source] FetchError),
}
