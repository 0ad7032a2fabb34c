//! Orchestrates a portfolio load.

mod config;
mod error;

pub use config::RunnerConfig;
pub use error::ShowcaseError;

use crate::github::{
    fetch_languages, fetch_profile, fetch_readme, fetch_repositories, within, LanguageBytes,
    Repository,
};
use crate::portfolio::{resolve_live_url, LinkOptions, Portfolio, PortfolioState, ProjectCard};
use crate::ranking::filter_and_rank;
use crate::readme::{extract_insights, extract_technologies, RawContentBase};
use crate::stack::aggregate_tech_stack;
use crate::throttle::{ensure_core_rate_limit, run_in_batches, Pause, TokioPause};
use chrono::Utc;
use octocrab::Octocrab;
use std::collections::HashMap;
use tracing::{debug, info, info_span, warn, Instrument};

/// Loads a portfolio snapshot from GitHub.
pub struct Runner<P = TokioPause> {
    config: RunnerConfig,
    octocrab: Octocrab,
    pause: P,
}

impl Runner<TokioPause> {
    /// Builds a runner from the provided configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ShowcaseError::Client`] if the GitHub client cannot be built.
    pub fn new(config: RunnerConfig) -> Result<Self, ShowcaseError> {
        let mut builder = Octocrab::builder();
        if let Some(token) = config.settings().token.clone() {
            builder = builder.personal_token(token);
        }
        if let Some(base_url) = config.api_base_url() {
            builder = builder.base_uri(base_url)?;
        }
        Ok(Self {
            octocrab: builder.build()?,
            config,
            pause: TokioPause,
        })
    }
}

impl<P: Pause> Runner<P> {
    /// Replaces the delay used between batches and by the rate limit guard.
    pub fn with_pause<Q: Pause>(self, pause: Q) -> Runner<Q> {
        Runner {
            config: self.config,
            octocrab: self.octocrab,
            pause,
        }
    }

    /// Returns the runner configuration.
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Executes the full load.
    ///
    /// Returns [`PortfolioState::Unconfigured`] without any network traffic
    /// when no username is set. Failures of per-repository lookups never abort
    /// the load: a missing language map becomes a warning and a missing README
    /// leaves the card without README-derived fields.
    ///
    /// # Errors
    ///
    /// Returns [`ShowcaseError::Profile`] or [`ShowcaseError::RepositoryList`]
    /// when the primary calls fail.
    pub async fn load(&self) -> Result<PortfolioState, ShowcaseError> {
        let settings = self.config.settings();
        let Some(username) = settings.username.as_deref() else {
            warn!("No GitHub username configured, skipping load");
            return Ok(PortfolioState::Unconfigured);
        };

        let span = info_span!("load_portfolio", username = %username);
        async {
            info!("Loading portfolio");
            let timeout = settings.request_timeout();

            let profile = within(timeout, "profile", fetch_profile(&self.octocrab, username))
                .await
                .map_err(ShowcaseError::Profile)?;
            let repositories = within(
                timeout,
                "repository list",
                fetch_repositories(&self.octocrab, username),
            )
            .await
            .map_err(ShowcaseError::RepositoryList)?;

            let fetched = repositories.len();
            let ranked = filter_and_rank(repositories, &settings.topics);
            info!(fetched, kept = ranked.len(), "Repositories ranked");

            if let Err(e) = ensure_core_rate_limit(&self.octocrab, &self.pause).await {
                debug!(error = %e, "Rate limit check failed, continuing");
            }

            let mut warnings = Vec::new();
            let languages = self.load_languages(username, &ranked, &mut warnings).await;
            let readmes = self.load_readmes(&ranked).await;

            let options = LinkOptions {
                overrides: &settings.url_overrides,
                guess_pages: !settings.disable_url_guessing,
            };
            let projects: Vec<ProjectCard> = ranked
                .into_iter()
                .zip(readmes)
                .map(|(repository, readme)| {
                    let insights = readme
                        .map(|text| {
                            let base = RawContentBase::new(
                                &repository.owner.login,
                                &repository.name,
                                repository.branch(),
                            );
                            extract_insights(&text, &base)
                        })
                        .unwrap_or_default();
                    let live_url = resolve_live_url(&repository, options);
                    ProjectCard::new(repository)
                        .with_insights(insights)
                        .with_live_url(live_url)
                })
                .collect();

            let profile_stack = self.load_profile_stack(username, &projects).await;
            let tech_stack = aggregate_tech_stack(&projects, &languages, &profile_stack);

            info!(
                projects = projects.len(),
                technologies = tech_stack.len(),
                warnings = warnings.len(),
                "Portfolio loaded"
            );
            Ok::<_, ShowcaseError>(PortfolioState::Loaded(Box::new(Portfolio {
                profile,
                projects,
                tech_stack,
                warnings,
                generated_at: Utc::now(),
            })))
        }
        .instrument(span)
        .await
    }

    /// Fetches language maps in batches; failures are recorded in `warnings`.
    async fn load_languages(
        &self,
        username: &str,
        repositories: &[Repository],
        warnings: &mut Vec<String>,
    ) -> HashMap<String, LanguageBytes> {
        let settings = self.config.settings();
        let timeout = settings.request_timeout();
        let names: Vec<&str> = repositories.iter().map(|r| r.name.as_str()).collect();

        let plan = settings.language_batch();

        let results = run_in_batches(names, plan, &self.pause, |name| async move {
            let result = within(
                timeout,
                "language map",
                fetch_languages(&self.octocrab, username, name),
            )
            .await;
            (name, result)
        })
        .await;

        let mut languages = HashMap::with_capacity(results.len());
        for (name, result) in results {
            match result {
                Ok(bytes) => {
                    languages.insert(name.to_string(), bytes);
                }
                Err(e) => {
                    warn!(repo = %name, error = %e, "Failed to load language map");
                    warnings.push(format!("Could not load languages for {name}: {e}"));
                }
            }
        }
        languages
    }

    /// Fetches READMEs in batches, in the same order as `repositories`.
    async fn load_readmes(&self, repositories: &[Repository]) -> Vec<Option<String>> {
        let targets: Vec<&Repository> = repositories.iter().collect();
        run_in_batches(
            targets,
            self.config.settings().readme_batch(),
            &self.pause,
            |repository| async move {
                self.readme_text(&repository.owner.login, &repository.name)
                    .await
            },
        )
        .await
    }

    /// Technologies declared in the profile README, if one is configured.
    ///
    /// Reuses the card when the profile repository is among the projects.
    async fn load_profile_stack(&self, username: &str, projects: &[ProjectCard]) -> Vec<String> {
        let Some(profile_repo) = self.config.settings().profile_repo.as_deref() else {
            return Vec::new();
        };

        if let Some(card) = projects
            .iter()
            .find(|card| card.repository.name.eq_ignore_ascii_case(profile_repo))
        {
            return card.technologies.clone();
        }

        self.readme_text(username, profile_repo)
            .await
            .map(|text| extract_technologies(&text))
            .unwrap_or_default()
    }

    async fn readme_text(&self, owner: &str, repo: &str) -> Option<String> {
        let timeout = self.config.settings().request_timeout();
        match within(timeout, "readme", fetch_readme(&self.octocrab, owner, repo)).await {
            Ok(text) => Some(text),
            Err(e) => {
                debug!(owner, repo, error = %e, "README unavailable");
                None
            }
        }
    }
}
