//! CLI for Repo Showcase.
//!
//! Loads a GitHub user's portfolio snapshot (profile, ranked projects with
//! README insights, aggregated tech stack) and prints it as JSON, Markdown or
//! a short summary.

use clap::{Parser, ValueEnum};
use repo_showcase::{
    load_config, parse_topic_list, ConfigError, Portfolio, PortfolioState, ReportError,
    ReportRenderer, Runner, RunnerConfig, ShowcaseError,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Repo Showcase - Build a portfolio snapshot from a GitHub account.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML settings file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// GitHub user whose repositories are shown.
    #[arg(long)]
    username: Option<String>,

    /// GitHub Personal Access Token.
    #[arg(long)]
    token: Option<String>,

    /// Comma-separated topic allow-list.
    #[arg(long)]
    topics: Option<String>,

    /// Repository whose README lists your primary stack.
    #[arg(long)]
    profile_repo: Option<String>,

    /// Never guess GitHub Pages URLs.
    #[arg(long)]
    no_url_guessing: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Summary)]
    format: Format,

    /// Handlebars template for Markdown output.
    #[arg(long)]
    template: Option<PathBuf>,

    /// Alternative GitHub API base URL.
    #[arg(long, env = "GITHUB_API_URL")]
    api_url: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Full snapshot as JSON.
    Json,
    /// Rendered Markdown report.
    Markdown,
    /// Short human-readable summary.
    Summary,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    init_tracing();

    let args = Args::parse();

    match run(args).await {
        Ok(true) => ExitCode::from(0),
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Logs go to stderr in compact form so stdout stays clean for the output.
/// The level is taken from `RUST_LOG` and defaults to "info".
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Errors surfaced by the CLI.
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Showcase(#[from] ShowcaseError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("Failed to serialize portfolio: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::Showcase(e.into())
    }
}

/// Main execution logic. Returns `false` when no username is configured.
async fn run(args: Args) -> Result<bool, CliError> {
    let mut settings = load_config(args.config.as_deref())?;

    if let Some(username) = args.username {
        settings.username = Some(username);
    }
    if let Some(token) = args.token {
        settings.token = Some(token);
    }
    if let Some(topics) = args.topics {
        settings.topics = parse_topic_list(&topics);
    }
    if let Some(profile_repo) = args.profile_repo {
        settings.profile_repo = Some(profile_repo);
    }
    if args.no_url_guessing {
        settings.disable_url_guessing = true;
    }
    settings.validate("command line")?;

    let mut config = RunnerConfig::new(settings);
    if let Some(api_url) = args.api_url {
        config = config.with_api_base_url(api_url);
    }

    let state = Runner::new(config)?.load().await?;

    if args.format == Format::Json {
        let json = serde_json::to_string_pretty(&state)?;
        println!("{json}");
    }

    let PortfolioState::Loaded(portfolio) = state else {
        warn!("Set GITHUB_USERNAME or pass --username to load a portfolio");
        return Ok(false);
    };

    match args.format {
        Format::Json => {}
        Format::Markdown => {
            let renderer = match &args.template {
                Some(path) => ReportRenderer::from_file(path),
                None => ReportRenderer::new(),
            }?;
            print!("{}", renderer.render(&portfolio)?);
        }
        Format::Summary => print_summary(&portfolio),
    }

    Ok(true)
}

/// Prints a short summary of the loaded portfolio.
fn print_summary(portfolio: &Portfolio) {
    let profile = &portfolio.profile;
    println!("\nPortfolio: {}", profile.name.as_deref().unwrap_or(&profile.login));
    println!("  Public repositories: {}", profile.public_repos);
    println!("  Projects shown: {}", portfolio.projects.len());

    for (i, project) in portfolio.projects.iter().enumerate() {
        println!(
            "  [{}/{}] {} ({} stars)",
            i + 1,
            portfolio.projects.len(),
            project.repository.name,
            project.repository.stargazers_count
        );
        if let Some(summary) = project.summary() {
            println!("    {summary}");
        }
        if let Some(url) = &project.live_url {
            println!("    Live: {url}");
        }
    }

    if !portfolio.tech_stack.is_empty() {
        println!("\n  Tech stack:");
        for entry in &portfolio.tech_stack {
            println!("    {:<20} {:>5.1}%", entry.name, entry.percentage);
        }
    }

    for warning in &portfolio.warnings {
        println!("\n  Warning: {warning}");
    }
}
