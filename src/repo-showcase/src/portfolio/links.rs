//! Live deployment URL resolution.

use crate::github::Repository;
use std::collections::HashMap;

/// Inputs for [`resolve_live_url`].
#[derive(Debug, Clone, Copy)]
pub struct LinkOptions<'a> {
    /// Repository name to URL overrides.
    pub overrides: &'a HashMap<String, String>,

    /// Whether GitHub Pages URLs may be guessed.
    pub guess_pages: bool,
}

/// Resolves where a project is deployed.
///
/// Order: configured override (case-insensitive name match), the repository
/// homepage, then a GitHub Pages guess when enabled and Pages is on.
pub fn resolve_live_url(repository: &Repository, options: LinkOptions<'_>) -> Option<String> {
    let overridden = options
        .overrides
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(&repository.name))
        .map(|(_, url)| url.trim())
        .filter(|url| !url.is_empty());
    if let Some(url) = overridden {
        return Some(url.to_string());
    }

    let homepage = repository
        .homepage
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty());
    if let Some(url) = homepage {
        return Some(url.to_string());
    }

    if !(options.guess_pages && repository.has_pages) {
        return None;
    }

    let owner = repository.owner.login.to_lowercase();
    let user_site = format!("{owner}.github.io");
    if repository.name.eq_ignore_ascii_case(&user_site) {
        Some(format!("https://{user_site}"))
    } else {
        Some(format!("https://{user_site}/{}", repository.name))
    }
}
