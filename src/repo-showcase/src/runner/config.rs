//! Runner configuration.

use crate::config::ShowcaseConfig;

/// Configuration for a portfolio load.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Loaded showcase settings.
    settings: ShowcaseConfig,
    /// Alternative GitHub API base URL.
    api_base_url: Option<String>,
}

impl RunnerConfig {
    /// Creates a configuration targeting the public GitHub API.
    pub fn new(settings: ShowcaseConfig) -> Self {
        Self {
            settings,
            api_base_url: None,
        }
    }

    /// Sets a custom API base URL (e.g. GitHub Enterprise or a mock server).
    pub fn with_api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = Some(api_base_url.into());
        self
    }

    /// Returns the showcase settings.
    pub fn settings(&self) -> &ShowcaseConfig {
        &self.settings
    }

    /// Returns the custom API base URL, if any.
    pub fn api_base_url(&self) -> Option<&str> {
        self.api_base_url.as_deref()
    }
}
