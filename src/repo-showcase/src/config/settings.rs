//! Showcase settings deserialization and overrides.

use super::{
    ConfigError, ENV_DISABLE_URL_GUESSING, ENV_PROFILE_REPO, ENV_TOKEN, ENV_TOPICS,
    ENV_URL_OVERRIDES, ENV_USERNAME,
};
use crate::throttle::{
    BatchPlan, DEFAULT_BATCH_PAUSE, LANGUAGE_BATCH_SIZE, README_BATCH_SIZE,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Settings for building a portfolio.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct ShowcaseConfig {
    /// GitHub user whose repositories are shown. Nothing loads without it.
    pub username: Option<String>,

    /// API token for higher rate limits.
    pub token: Option<String>,

    /// Topic allow-list, lowercase. Empty keeps every repository.
    pub topics: Vec<String>,

    /// Repository name to deployed URL.
    pub url_overrides: HashMap<String, String>,

    /// Repository whose README lists the owner's primary stack.
    pub profile_repo: Option<String>,

    /// Disables GitHub Pages URL guessing.
    pub disable_url_guessing: bool,

    /// Deadline for each upstream call, in seconds.
    pub request_timeout_secs: u64,

    /// Concurrent language lookups per batch.
    pub language_batch_size: usize,

    /// Concurrent README lookups per batch.
    pub readme_batch_size: usize,

    /// Pause between batches, in milliseconds.
    pub batch_pause_ms: u64,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            username: None,
            token: None,
            topics: Vec::new(),
            url_overrides: HashMap::new(),
            profile_repo: None,
            disable_url_guessing: false,
            request_timeout_secs: 15,
            language_batch_size: LANGUAGE_BATCH_SIZE,
            readme_batch_size: README_BATCH_SIZE,
            batch_pause_ms: DEFAULT_BATCH_PAUSE.as_millis() as u64,
        }
    }
}

impl fmt::Debug for ShowcaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShowcaseConfig")
            .field("username", &self.username)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("topics", &self.topics)
            .field("url_overrides", &self.url_overrides)
            .field("profile_repo", &self.profile_repo)
            .field("disable_url_guessing", &self.disable_url_guessing)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("language_batch_size", &self.language_batch_size)
            .field("readme_batch_size", &self.readme_batch_size)
            .field("batch_pause_ms", &self.batch_pause_ms)
            .finish()
    }
}

impl ShowcaseConfig {
    /// Reads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IoError`] or [`ConfigError::TomlError`].
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        let mut config: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlError {
            path: path.display().to_string(),
            source: e,
        })?;
        config.normalize();
        Ok(config)
    }

    /// Overrides settings from the process environment.
    ///
    /// Unset or blank variables leave the current value untouched.
    pub fn apply_env(&mut self) {
        let var = |key: &str| {
            std::env::var(key)
                .ok()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(username) = var(ENV_USERNAME) {
            self.username = Some(username);
        }
        if let Some(token) = var(ENV_TOKEN) {
            self.token = Some(token);
        }
        if let Some(topics) = var(ENV_TOPICS) {
            self.topics = parse_topic_list(&topics);
        }
        if let Some(overrides) = var(ENV_URL_OVERRIDES) {
            self.url_overrides = parse_url_overrides(&overrides);
        }
        if let Some(repo) = var(ENV_PROFILE_REPO) {
            self.profile_repo = Some(repo);
        }
        if let Some(flag) = var(ENV_DISABLE_URL_GUESSING) {
            self.disable_url_guessing = parse_flag(&flag);
        }
        self.normalize();
    }

    /// Checks that every setting is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] naming the offending key.
    pub fn validate(&self, source_name: &str) -> Result<(), ConfigError> {
        let invalid = |key: &'static str, message: String| ConfigError::ValidationError {
            source_name: source_name.to_string(),
            key,
            message,
        };

        if let Some(username) = &self.username {
            if !is_valid_login(username) {
                return Err(invalid(
                    "username",
                    format!("'{username}' is not a valid GitHub login"),
                ));
            }
        }
        if self.request_timeout_secs == 0 {
            return Err(invalid(
                "request-timeout-secs",
                "must be at least 1".to_string(),
            ));
        }
        if self.language_batch_size == 0 {
            return Err(invalid("language-batch-size", "must be at least 1".to_string()));
        }
        if self.readme_batch_size == 0 {
            return Err(invalid("readme-batch-size", "must be at least 1".to_string()));
        }
        for (repo, url) in &self.url_overrides {
            if Url::parse(url).is_err() {
                return Err(invalid(
                    "url-overrides",
                    format!("'{url}' for '{repo}' is not an absolute URL"),
                ));
            }
        }
        Ok(())
    }

    /// Returns the per-call deadline.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Returns the batch plan for language lookups.
    pub fn language_batch(&self) -> BatchPlan {
        BatchPlan::new(self.language_batch_size, self.batch_pause())
    }

    /// Returns the batch plan for README lookups.
    pub fn readme_batch(&self) -> BatchPlan {
        BatchPlan::new(self.readme_batch_size, self.batch_pause())
    }

    fn batch_pause(&self) -> Duration {
        Duration::from_millis(self.batch_pause_ms)
    }

    /// Trims values and turns blanks into `None`.
    fn normalize(&mut self) {
        let blank_to_none = |value: &mut Option<String>| {
            *value = value
                .take()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty());
        };
        blank_to_none(&mut self.username);
        blank_to_none(&mut self.token);
        blank_to_none(&mut self.profile_repo);
        self.topics = parse_topic_list(&self.topics.join(","));
    }
}

/// GitHub logins are alphanumeric with single inner hyphens, at most 39 chars.
fn is_valid_login(login: &str) -> bool {
    !login.is_empty()
        && login.len() <= 39
        && !login.starts_with('-')
        && !login.ends_with('-')
        && !login.contains("--")
        && login.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Parses a comma-separated topic list into trimmed, lowercase, non-empty topics.
pub fn parse_topic_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|topic| topic.trim().to_lowercase())
        .filter(|topic| !topic.is_empty())
        .collect()
}

/// Parses `repo=url` pairs separated by commas. Malformed pairs are ignored.
pub fn parse_url_overrides(value: &str) -> HashMap<String, String> {
    value
        .split(',')
        .filter_map(|pair| {
            let (repo, url) = pair.split_once('=')?;
            let (repo, url) = (repo.trim(), url.trim());
            (!repo.is_empty() && !url.is_empty()).then(|| (repo.to_string(), url.to_string()))
        })
        .collect()
}

/// Parses a boolean flag; `1`, `true`, `yes` and `on` are true.
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_list_is_trimmed_and_lowercased() {
        assert_eq!(
            parse_topic_list(" Featured,ongoing ,, CASE-STUDY "),
            vec!["featured", "ongoing", "case-study"]
        );
        assert!(parse_topic_list("").is_empty());
    }

    #[test]
    fn url_overrides_skip_malformed_pairs() {
        let overrides = parse_url_overrides(
            "a=https://a.dev,broken,=https://x.dev, b = https://b.dev/path?x=1",
        );
        assert_eq!(overrides.len(), 2);
        assert_eq!(overrides["a"], "https://a.dev");
        assert_eq!(overrides["b"], "https://b.dev/path?x=1");
    }

    #[test]
    fn flags() {
        assert!(parse_flag("TRUE"));
        assert!(parse_flag("1"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag("nope"));
    }

    #[test]
    fn validates_logins() {
        assert!(is_valid_login("alice-dev"));
        assert!(!is_valid_login("alice/dev"));
        assert!(!is_valid_login("-alice"));
        assert!(!is_valid_login("a--b"));
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let config = ShowcaseConfig {
            readme_batch_size: 0,
            ..ShowcaseConfig::default()
        };
        assert!(matches!(
            config.validate("test"),
            Err(ConfigError::ValidationError { key: "readme-batch-size", .. })
        ));
    }

    #[test]
    fn debug_redacts_token() {
        let config = ShowcaseConfig {
            token: Some("ghp_secret".to_string()),
            ..ShowcaseConfig::default()
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("ghp_secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn file_values_are_normalized() {
        let mut config: ShowcaseConfig =
            toml::from_str("username = \"  \"\ntopics = [\" Portfolio \", \"\"]").unwrap();
        config.normalize();

        assert_eq!(config.username, None);
        assert_eq!(config.topics, vec!["portfolio"]);
    }
}
