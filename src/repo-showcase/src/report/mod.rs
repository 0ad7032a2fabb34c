//! Markdown report rendering.
//!
//! Renders a [`Portfolio`] with Handlebars, using the built-in template or a
//! custom one supplied by the user.

mod error;

pub use error::ReportError;

use crate::portfolio::Portfolio;
use handlebars::{handlebars_helper, no_escape, Handlebars};
use std::path::Path;

const REPORT_TEMPLATE_NAME: &str = "report";

/// Built-in report template.
pub const DEFAULT_TEMPLATE: &str = r#"# {{#if profile.name}}{{profile.name}}{{else}}{{profile.login}}{{/if}}

{{#if profile.bio}}
> {{profile.bio}}

{{/if}}
GitHub: {{profile.html_url}}

## Tech Stack

| Technology | Share |
|------------|------:|
{{#each tech_stack}}
| {{name}} | {{percent percentage}}% |
{{/each}}

## Projects
{{#each projects}}

### [{{name}}]({{html_url}})

{{#if readme_description}}
{{readme_description}}
{{else}}
{{#if description}}
{{description}}
{{/if}}
{{/if}}
{{#if technologies}}
Built with: {{join technologies}}
{{/if}}
{{#if live_url}}
Live: {{live_url}}
{{/if}}
{{#if preview_image}}

![{{name}}]({{preview_image}})
{{/if}}
{{/each}}
{{#if warnings}}

## Warnings
{{#each warnings}}
- {{this}}
{{/each}}
{{/if}}
"#;

handlebars_helper!(percent: |value: f64| format!("{value:.1}"));
handlebars_helper!(join: |items: array| items
    .iter()
    .filter_map(|item| item.as_str())
    .collect::<Vec<_>>()
    .join(", "));

/// Creates a configured Handlebars registry with custom helpers.
///
/// The registry is configured with:
/// - No HTML escaping (for markdown output)
/// - Strict mode (catches missing variables)
/// - `percent` helper formatting a number with one decimal
/// - `join` helper joining a string array with commas
#[must_use]
pub fn create_handlebars_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();
    hbs.register_escape_fn(no_escape);
    hbs.set_strict_mode(true);
    hbs.register_helper("percent", Box::new(percent));
    hbs.register_helper("join", Box::new(join));
    hbs
}

/// Markdown renderer for portfolio snapshots.
pub struct ReportRenderer {
    handlebars: Handlebars<'static>,
}

impl ReportRenderer {
    /// Creates a renderer using [`DEFAULT_TEMPLATE`].
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Template`] if the template does not compile.
    pub fn new() -> Result<Self, ReportError> {
        Self::with_template(DEFAULT_TEMPLATE)
    }

    /// Creates a renderer from template source.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Template`] if the template does not compile.
    pub fn with_template(template: &str) -> Result<Self, ReportError> {
        let mut handlebars = create_handlebars_registry();
        handlebars
            .register_template_string(REPORT_TEMPLATE_NAME, template)
            .map_err(Box::new)?;
        Ok(Self { handlebars })
    }

    /// Creates a renderer from a template file.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::IoError`] if the file cannot be read, or
    /// [`ReportError::Template`] if it does not compile.
    pub fn from_file(path: &Path) -> Result<Self, ReportError> {
        let template = std::fs::read_to_string(path).map_err(|e| ReportError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::with_template(&template)
    }

    /// Renders a portfolio.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Render`] if the template references missing data.
    pub fn render(&self, portfolio: &Portfolio) -> Result<String, ReportError> {
        Ok(self.handlebars.render(REPORT_TEMPLATE_NAME, portfolio)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::{fixtures::repository, UserProfile};
    use crate::portfolio::ProjectCard;
    use crate::stack::TechStackEntry;
    use chrono::Utc;

    fn portfolio() -> Portfolio {
        let mut repo = repository("weather");
        repo.description = Some("Forecast dashboard".to_string());
        let mut card =
            ProjectCard::new(repo).with_live_url(Some("https://weather.dev".to_string()));
        card.technologies = vec!["React".to_string(), "Go".to_string()];

        Portfolio {
            profile: UserProfile {
                login: "alice".to_string(),
                name: Some("Alice Liddell".to_string()),
                bio: None,
                avatar_url: "https://avatars.githubusercontent.com/u/1".to_string(),
                html_url: "https://github.com/alice".to_string(),
                blog: None,
                location: None,
                company: None,
                public_repos: 1,
                followers: 0,
                following: 0,
            },
            projects: vec![card],
            tech_stack: vec![TechStackEntry {
                name: "React".to_string(),
                weight: 10_000,
                percentage: 10_000.0 / 11_000.0 * 100.0,
            }],
            warnings: vec!["Failed to load language map for alice/old".to_string()],
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn renders_default_report() {
        let report = ReportRenderer::new().unwrap().render(&portfolio()).unwrap();

        assert!(report.starts_with("# Alice Liddell"));
        assert!(report.contains("| React | 90.9% |"));
        assert!(report.contains("### [weather](https://github.com/alice/weather)"));
        assert!(report.contains("Forecast dashboard"));
        assert!(report.contains("Built with: React, Go"));
        assert!(report.contains("Live: https://weather.dev"));
        assert!(report.contains("- Failed to load language map for alice/old"));
    }

    #[test]
    fn custom_template_is_used() {
        let renderer =
            ReportRenderer::with_template("{{profile.login}}:{{#each projects}} {{name}}{{/each}}")
                .unwrap();
        assert_eq!(renderer.render(&portfolio()).unwrap(), "alice: weather");
    }

    #[test]
    fn strict_mode_rejects_unknown_fields() {
        let renderer = ReportRenderer::with_template("{{profile.nickname}}").unwrap();
        assert!(matches!(
            renderer.render(&portfolio()),
            Err(ReportError::Render(_))
        ));
    }

    #[test]
    fn invalid_template_fails_to_compile() {
        assert!(matches!(
            ReportRenderer::with_template("{{#each projects}}unclosed"),
            Err(ReportError::Template(_))
        ));
    }

    #[test]
    fn missing_template_file_is_io_error() {
        let result = ReportRenderer::from_file(Path::new("/definitely/not/here.hbs"));
        assert!(matches!(result, Err(ReportError::IoError { .. })));
    }
}
