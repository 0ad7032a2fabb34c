//! GitHub REST API payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Language name to byte count, as returned by `GET /repos/{owner}/{repo}/languages`.
pub type LanguageBytes = HashMap<String, u64>;

/// Public profile of a GitHub user.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserProfile {
    /// Account login.
    pub login: String,

    /// Display name.
    pub name: Option<String>,

    /// Profile bio.
    pub bio: Option<String>,

    /// Avatar image URL.
    pub avatar_url: String,

    /// Profile page URL.
    pub html_url: String,

    /// Personal website, often an empty string when unset.
    pub blog: Option<String>,

    /// Free-form location.
    pub location: Option<String>,

    /// Company or organization.
    pub company: Option<String>,

    /// Number of public repositories.
    #[serde(default)]
    pub public_repos: u32,

    /// Number of followers.
    #[serde(default)]
    pub followers: u32,

    /// Number of followed accounts.
    #[serde(default)]
    pub following: u32,
}

/// Owner of a repository.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RepositoryOwner {
    /// Owner login.
    pub login: String,
}

/// A repository snapshot as returned by `GET /users/{user}/repos`.
///
/// The snapshot is never mutated; derived data is attached by wrapping it in a
/// [`ProjectCard`](crate::portfolio::ProjectCard).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Repository {
    /// Numeric repository id.
    pub id: u64,

    /// Repository name.
    pub name: String,

    /// Full repository name in "owner/name" format.
    pub full_name: String,

    /// Repository owner.
    pub owner: RepositoryOwner,

    /// Short description set on GitHub.
    pub description: Option<String>,

    /// Repository page URL.
    pub html_url: String,

    /// Homepage URL set on GitHub.
    pub homepage: Option<String>,

    /// Primary language detected by GitHub.
    pub language: Option<String>,

    /// Topics attached by the owner.
    #[serde(default)]
    pub topics: Vec<String>,

    /// Star count.
    #[serde(default)]
    pub stargazers_count: u32,

    /// Fork count.
    #[serde(default)]
    pub forks_count: u32,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,

    /// Last push timestamp.
    pub pushed_at: Option<DateTime<Utc>>,

    /// Whether the repository is a fork.
    #[serde(default)]
    pub fork: bool,

    /// Whether the repository is archived.
    #[serde(default)]
    pub archived: bool,

    /// Whether the repository is private.
    #[serde(default)]
    pub private: bool,

    /// Default branch name (e.g., "main").
    pub default_branch: Option<String>,

    /// Whether GitHub Pages is enabled.
    #[serde(default)]
    pub has_pages: bool,
}

impl Repository {
    /// Returns the default branch, falling back to "main".
    pub fn branch(&self) -> &str {
        self.default_branch.as_deref().unwrap_or("main")
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_repository_with_missing_optional_fields() {
        let repo: Repository = serde_json::from_value(serde_json::json!({
            "id": 7,
            "name": "demo",
            "full_name": "alice/demo",
            "owner": { "login": "alice" },
            "description": null,
            "html_url": "https://github.com/alice/demo",
            "homepage": null,
            "language": "Rust",
            "created_at": "2023-05-01T10:00:00Z",
            "updated_at": "2024-02-01T10:00:00Z",
            "pushed_at": null,
            "default_branch": null
        }))
        .unwrap();

        assert!(repo.topics.is_empty());
        assert!(!repo.fork && !repo.archived && !repo.private);
        assert_eq!(repo.branch(), "main");
    }
}
