//! Configuration loading.
//!
//! Settings come from an optional TOML file and are then overridden by
//! environment variables. A missing username is not an error here; it makes
//! the run report an unconfigured portfolio instead.

mod error;
mod settings;

pub use error::ConfigError;
pub use settings::{parse_flag, parse_topic_list, parse_url_overrides, ShowcaseConfig};

use std::path::Path;
use tracing::{debug, info};

/// Environment variable holding the target username.
pub const ENV_USERNAME: &str = "GITHUB_USERNAME";
/// Environment variable holding the API token.
pub const ENV_TOKEN: &str = "GITHUB_TOKEN";
/// Environment variable holding the comma-separated topic allow-list.
pub const ENV_TOPICS: &str = "GITHUB_TOPICS";
/// Environment variable holding `repo=url` overrides.
pub const ENV_URL_OVERRIDES: &str = "GITHUB_URL_OVERRIDES";
/// Environment variable naming the profile README repository.
pub const ENV_PROFILE_REPO: &str = "GITHUB_PROFILE_REPO";
/// Environment variable disabling GitHub Pages URL guessing.
pub const ENV_DISABLE_URL_GUESSING: &str = "GITHUB_DISABLE_URL_GUESSING";

/// Loads configuration from `path` (if given), applies environment overrides
/// and validates the result.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be read or parsed, or a setting
/// is invalid.
pub fn load_config(path: Option<&Path>) -> Result<ShowcaseConfig, ConfigError> {
    let (mut config, source_name) = match path {
        Some(path) => {
            info!(path = %path.display(), "Loading config file");
            (ShowcaseConfig::from_file(path)?, path.display().to_string())
        }
        None => (ShowcaseConfig::default(), "environment".to_string()),
    };

    config.apply_env();
    config.validate(&source_name)?;
    debug!(
        username = config.username.as_deref().unwrap_or("<unset>"),
        topics = config.topics.len(),
        overrides = config.url_overrides.len(),
        "Configuration loaded"
    );
    Ok(config)
}
