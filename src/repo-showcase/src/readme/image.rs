//! Preview image extraction.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Hosts that serve status badges.
const BADGE_HOSTS: &[&str] = &[
    "shields.io",
    "badgen.net",
    "badge.fury.io",
    "github.com",
    "travis-ci.org",
    "travis-ci.com",
    "codecov.io",
    "coveralls.io",
    "circleci.com",
    "api.netlify.com",
];

/// Hosts whose URLs are images even without a file extension.
const RAW_CONTENT_HOSTS: &[&str] = &[
    "raw.githubusercontent.com",
    "user-images.githubusercontent.com",
    "private-user-images.githubusercontent.com",
    "camo.githubusercontent.com",
    "github.com/user-attachments",
    "i.imgur.com",
];

const IMAGE_EXTENSIONS: &[&str] = &[
    ".png", ".jpg", ".jpeg", ".gif", ".webp", ".svg", ".avif", ".bmp",
];

/// Icon URLs at least this long are not treated as icons.
const ICON_URL_MAX_LEN: usize = 50;

static MARKDOWN_IMAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"!\[[^\]]*\]\(\s*<?([^)\s>]+)>?(?:\s+["'][^"']*["'])?\s*\)"#).unwrap()
});
static HTML_IMAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)<img\b[^>]*?\bsrc\s*=\s*["']([^"']+)["']"#).unwrap());

/// Location used to resolve relative README paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawContentBase {
    /// Repository owner.
    pub owner: String,

    /// Repository name.
    pub repo: String,

    /// Branch the README was read from.
    pub branch: String,
}

impl RawContentBase {
    /// Creates a base for `owner/repo` on `branch`.
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            branch: branch.into(),
        }
    }

    /// Returns the raw-content URL of the branch root, with a trailing slash.
    #[must_use]
    pub fn root(&self) -> String {
        format!(
            "https://raw.githubusercontent.com/{}/{}/{}/",
            self.owner, self.repo, self.branch
        )
    }

    /// Resolves an image reference found in the README to an absolute URL.
    #[must_use]
    pub fn resolve(&self, reference: &str) -> Option<String> {
        let reference = reference.trim();
        if reference.is_empty() || reference.starts_with('#') {
            return None;
        }

        let lower = reference.to_ascii_lowercase();
        if lower.starts_with("http://")
            || lower.starts_with("https://")
            || lower.starts_with("data:")
        {
            return Some(reference.to_string());
        }
        if let Some(rest) = reference.strip_prefix("//") {
            return Some(format!("https://{rest}"));
        }

        let mut relative = reference;
        while let Some(rest) = relative.strip_prefix("./") {
            relative = rest;
        }
        let relative = relative.trim_start_matches('/');

        Url::parse(&self.root())
            .and_then(|root| root.join(relative))
            .ok()
            .map(String::from)
    }
}

/// Extracts the first preview-worthy image from README text.
///
/// Badges and small icons are skipped; relative paths are resolved against
/// `base`. Returns `None` when nothing qualifies.
pub fn extract_preview_image(readme: &str, base: &RawContentBase) -> Option<String> {
    image_references(readme)
        .into_iter()
        .filter(|reference| !is_badge(reference) && !is_icon(reference))
        .filter_map(|reference| base.resolve(reference))
        .find(|url| is_image_url(url))
}

/// Returns Markdown and HTML image references in order of appearance.
fn image_references(readme: &str) -> Vec<&str> {
    let mut found: Vec<(usize, &str)> = MARKDOWN_IMAGE
        .captures_iter(readme)
        .chain(HTML_IMAGE.captures_iter(readme))
        .filter_map(|caps| {
            let start = caps.get(0)?.start();
            Some((start, caps.get(1)?.as_str()))
        })
        .collect();
    found.sort_by_key(|(start, _)| *start);
    found.into_iter().map(|(_, url)| url).collect()
}

fn is_badge(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.contains("badge") && BADGE_HOSTS.iter().any(|host| lower.contains(host))
}

fn is_icon(url: &str) -> bool {
    url.to_ascii_lowercase().contains("icon") && url.chars().count() < ICON_URL_MAX_LEN
}

fn is_image_url(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("data:image") {
        return true;
    }

    let path = lower.split(['?', '#']).next().unwrap_or_default();
    IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
        || RAW_CONTENT_HOSTS.iter().any(|host| lower.contains(host))
}
