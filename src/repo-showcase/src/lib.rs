#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod config;
pub mod github;
pub mod portfolio;
pub mod ranking;
pub mod readme;
pub mod report;
pub mod runner;
pub mod stack;
pub mod throttle;

pub use config::{load_config, parse_topic_list, ConfigError, ShowcaseConfig};
pub use github::{
    fetch_languages, fetch_profile, fetch_readme, fetch_repositories, FetchError, LanguageBytes,
    Repository, RepositoryOwner, UserProfile,
};
pub use portfolio::{resolve_live_url, LinkOptions, Portfolio, PortfolioState, ProjectCard};
pub use ranking::{filter_and_rank, filter_repositories, rank_repositories, TopicTier};
pub use readme::{
    extract_description, extract_insights, extract_preview_image, extract_technologies,
    RawContentBase, ReadmeInsights,
};
pub use report::{create_handlebars_registry, ReportError, ReportRenderer};
pub use runner::{Runner, RunnerConfig, ShowcaseError};
pub use stack::{aggregate_tech_stack, TechStackEntry};
pub use throttle::{
    check_core_rate_limit, ensure_core_rate_limit, run_in_batches, BatchPlan, Pause, RateLimitInfo,
    TokioPause,
};
