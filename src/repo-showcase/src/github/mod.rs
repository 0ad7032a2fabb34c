//! Repository fetching from the GitHub REST API.
//!
//! This module retrieves a user's profile, repository list, per-repository
//! language bytes and README text. Every call is a thin wrapper around a single
//! upstream request; batching and degradation are decided by the caller.

mod error;
mod models;

pub use error::FetchError;
pub use models::{LanguageBytes, Repository, RepositoryOwner, UserProfile};

#[cfg(test)]
pub(crate) use models::fixtures;

use octocrab::Octocrab;
use serde::Serialize;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Repositories requested per page. Only the first page is read.
pub const REPOS_PER_PAGE: u8 = 100;

/// Query parameters for the repository listing.
#[derive(Serialize)]
struct RepoListParams {
    per_page: u8,
    sort: &'static str,
}

/// Fetches the public profile of `username`.
///
/// # Errors
///
/// Returns [`FetchError::GitHubError`] on a non-success status or network failure.
pub async fn fetch_profile(octocrab: &Octocrab, username: &str) -> Result<UserProfile, FetchError> {
    debug!(username, "Fetching profile");
    let profile: UserProfile = octocrab
        .get(format!("/users/{username}"), None::<&()>)
        .await?;
    Ok(profile)
}

/// Fetches up to [`REPOS_PER_PAGE`] repositories of `username`, most recently updated first.
///
/// # Errors
///
/// Returns [`FetchError::GitHubError`] on a non-success status or network failure.
pub async fn fetch_repositories(
    octocrab: &Octocrab,
    username: &str,
) -> Result<Vec<Repository>, FetchError> {
    debug!(username, "Fetching repository list");
    let params = RepoListParams {
        per_page: REPOS_PER_PAGE,
        sort: "updated",
    };
    let repositories: Vec<Repository> = octocrab
        .get(format!("/users/{username}/repos"), Some(&params))
        .await?;
    Ok(repositories)
}

/// Fetches the language byte counts of a repository.
///
/// # Errors
///
/// Returns [`FetchError::GitHubError`] on a non-success status or network failure.
pub async fn fetch_languages(
    octocrab: &Octocrab,
    owner: &str,
    repo: &str,
) -> Result<LanguageBytes, FetchError> {
    let languages: LanguageBytes = octocrab
        .get(format!("/repos/{owner}/{repo}/languages"), None::<&()>)
        .await?;
    Ok(languages)
}

/// Fetches the README of a repository as text.
///
/// # Errors
///
/// Returns [`FetchError::GitHubError`] if the repository has no README or the
/// request fails, and [`FetchError::EmptyReadme`] if the payload cannot be decoded.
pub async fn fetch_readme(
    octocrab: &Octocrab,
    owner: &str,
    repo: &str,
) -> Result<String, FetchError> {
    let content = octocrab.repos(owner, repo).get_readme().send().await?;
    content.decoded_content().ok_or_else(|| FetchError::EmptyReadme {
        repo: format!("{owner}/{repo}"),
    })
}

/// Runs an upstream call with a deadline.
///
/// # Errors
///
/// Returns [`FetchError::Timeout`] when `limit` elapses first, otherwise the
/// call's own error.
pub async fn within<T>(
    limit: Duration,
    resource: &str,
    call: impl Future<Output = Result<T, FetchError>>,
) -> Result<T, FetchError> {
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout {
            resource: resource.to_string(),
            seconds: limit.as_secs(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn within_passes_through_result() {
        let result = within(Duration::from_secs(1), "profile", async {
            Ok::<_, FetchError>(42)
        })
        .await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test(start_paused = true)]
    async fn within_times_out_hung_call() {
        let hung = async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok::<_, FetchError>(())
        };

        let result = within(Duration::from_secs(5), "readme alice/demo", hung).await;
        assert!(matches!(
            result,
            Err(FetchError::Timeout { ref resource, seconds: 5 }) if resource == "readme alice/demo"
        ));
    }
}
