//! Portfolio snapshot types.

mod links;

pub use links::{resolve_live_url, LinkOptions};

use crate::github::{Repository, UserProfile};
use crate::readme::ReadmeInsights;
use crate::stack::TechStackEntry;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A repository augmented with README-derived fields.
///
/// The wrapped [`Repository`] is kept as fetched; derived data lives beside it.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectCard {
    /// Repository snapshot.
    #[serde(flatten)]
    pub repository: Repository,

    /// Description mined from the README.
    pub readme_description: Option<String>,

    /// Preview image mined from the README.
    pub preview_image: Option<String>,

    /// Technologies declared in the README.
    pub technologies: Vec<String>,

    /// Deployed site, if known.
    pub live_url: Option<String>,
}

impl ProjectCard {
    /// Wraps a repository with no derived data.
    #[must_use]
    pub fn new(repository: Repository) -> Self {
        Self {
            repository,
            readme_description: None,
            preview_image: None,
            technologies: Vec::new(),
            live_url: None,
        }
    }

    /// Attaches README insights.
    #[must_use]
    pub fn with_insights(mut self, insights: ReadmeInsights) -> Self {
        self.readme_description = insights.description;
        self.preview_image = insights.preview_image;
        self.technologies = insights.technologies;
        self
    }

    /// Attaches a live URL.
    #[must_use]
    pub fn with_live_url(mut self, live_url: Option<String>) -> Self {
        self.live_url = live_url;
        self
    }

    /// README description, falling back to the GitHub description.
    pub fn summary(&self) -> Option<&str> {
        self.readme_description
            .as_deref()
            .or(self.repository.description.as_deref())
    }
}

/// Everything a presentation layer needs to show a portfolio.
#[derive(Debug, Clone, Serialize)]
pub struct Portfolio {
    /// Owner profile.
    pub profile: UserProfile,

    /// Ranked project cards.
    pub projects: Vec<ProjectCard>,

    /// Aggregated technologies.
    pub tech_stack: Vec<TechStackEntry>,

    /// User-visible problems that did not stop the load.
    pub warnings: Vec<String>,

    /// When the snapshot was built.
    pub generated_at: DateTime<Utc>,
}

/// Outcome of a portfolio load.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", content = "portfolio", rename_all = "snake_case")]
pub enum PortfolioState {
    /// No username configured; nothing was fetched.
    Unconfigured,

    /// Snapshot loaded.
    Loaded(Box<Portfolio>),
}

impl PortfolioState {
    /// Returns the portfolio if one was loaded.
    pub fn portfolio(&self) -> Option<&Portfolio> {
        match self {
            Self::Loaded(portfolio) => Some(portfolio.as_ref()),
            Self::Unconfigured => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::fixtures::repository;

    #[test]
    fn summary_prefers_readme_description() {
        let mut repo = repository("demo");
        repo.description = Some("GitHub description".to_string());

        let plain = ProjectCard::new(repo.clone());
        assert_eq!(plain.summary(), Some("GitHub description"));

        let enriched = ProjectCard::new(repo).with_insights(ReadmeInsights {
            description: Some("README description".to_string()),
            ..ReadmeInsights::default()
        });
        assert_eq!(enriched.summary(), Some("README description"));
    }

    #[test]
    fn card_serializes_flat() {
        let card = ProjectCard::new(repository("demo"));
        let value = serde_json::to_value(&card).unwrap();

        assert_eq!(value["name"], "demo");
        assert!(value["technologies"].as_array().unwrap().is_empty());
        assert!(value.get("repository").is_none());
    }

    #[test]
    fn unconfigured_state_serializes_with_tag() {
        let value = serde_json::to_value(PortfolioState::Unconfigured).unwrap();
        assert_eq!(value["state"], "unconfigured");
    }
}
