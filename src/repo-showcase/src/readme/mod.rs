//! README mining.
//!
//! Derives a short description, a preview image and a categorized technology
//! list from loosely structured Markdown. Every extraction is best effort:
//! malformed or missing input yields `None` or an empty list, never an error.

mod description;
mod image;
mod rules;
mod tech_stack;

pub use description::extract_description;
pub use image::{extract_preview_image, RawContentBase};
pub use tech_stack::extract_technologies;

use serde::Serialize;

/// Everything derived from a single README.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReadmeInsights {
    /// Short prose description.
    pub description: Option<String>,

    /// Absolute URL of the preview image.
    pub preview_image: Option<String>,

    /// Normalized technology names, most important first.
    pub technologies: Vec<String>,
}

/// Runs all three extractions over `readme`.
pub fn extract_insights(readme: &str, base: &RawContentBase) -> ReadmeInsights {
    ReadmeInsights {
        description: extract_description(readme),
        preview_image: extract_preview_image(readme, base),
        technologies: extract_technologies(readme),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_all_fields_from_typical_readme() {
        let readme = "\
# Weather Board

[![CI](https://github.com/alice/weather/actions/workflows/ci.yml/badge.svg)](https://github.com/alice/weather/actions)

A dashboard that shows hyperlocal forecasts from several open weather APIs.

![screenshot](docs/screenshot.png)

---

## Tech Stack
- **Frontend:** Next.js, Tailwind, TypeScript
- **Backend:** FastAPI (Python 3.12)
";
        let insights = extract_insights(readme, &RawContentBase::new("alice", "weather", "main"));

        assert_eq!(
            insights.description.as_deref(),
            Some("A dashboard that shows hyperlocal forecasts from several open weather APIs.")
        );
        assert_eq!(
            insights.preview_image.as_deref(),
            Some("https://raw.githubusercontent.com/alice/weather/main/docs/screenshot.png")
        );
        assert_eq!(
            insights.technologies,
            vec!["Next.js", "Tailwind CSS", "TypeScript", "FastAPI"]
        );
    }

    #[test]
    fn empty_readme_yields_defaults() {
        let insights = extract_insights("", &RawContentBase::new("a", "b", "main"));
        assert_eq!(insights, ReadmeInsights::default());
    }
}
