//! Technology list extraction from a README tech-stack section.

use super::rules::{normalize_tech_name, CATEGORY_KEYWORDS, LABEL_PATTERNS, TECH_PROBES};
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::collections::HashSet;
use tracing::trace;

/// Headings tried when no "Tech Stack" heading exists.
const FALLBACK_HEADINGS: &[&str] = &["technologies", "stack", "tech", "built with"];

/// Below this many explicit entries, the section is probed for known names.
const MIN_EXPLICIT_ENTRIES: usize = 3;

static HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s{0,3}(#{1,6})\s+(.+?)\s*#*\s*$").unwrap());
static PARENTHETICAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^)]*\)").unwrap());
static MARKUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\([^)]*\)|[`*_]").unwrap());
static CONNECTIVE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(?:and|or|with)\b").unwrap());

const VALUE_SEPARATORS: &[char] = &[',', '|', '•', '·', '\n'];
const STRAY_BULLETS: &[char] = &['*', '-', '+', '•', '·', ' ', '\t'];

/// A Markdown heading with its line position.
struct Heading<'a> {
    line: usize,
    level: usize,
    text: &'a str,
}

/// Extracts a categorized technology list from README text.
///
/// Only frontend, backend and framework entries of the tech-stack section are
/// kept. The result is normalized, deduplicated case-insensitively and keeps
/// first-seen order. Returns an empty list when no such section exists.
pub fn extract_technologies(readme: &str) -> Vec<String> {
    let Some(section) = find_section(readme) else {
        return Vec::new();
    };

    let lines: Vec<&str> = section.lines().collect();
    let mut technologies = TechList::default();
    let mut index = 0;
    while index < lines.len() {
        let line = lines[index];
        index += 1;
        let Some((label, values)) = match_label(line) else {
            continue;
        };

        let values: Cow<str> = if values.trim().is_empty() {
            let (nested, consumed) = nested_values(&lines[index..], indent(line));
            index += consumed;
            Cow::Owned(nested)
        } else {
            Cow::Borrowed(values)
        };

        if !is_wanted_category(label) {
            continue;
        }
        for fragment in split_values(&values) {
            technologies.push(normalize_tech_name(&fragment));
        }
    }

    if technologies.len() < MIN_EXPLICIT_ENTRIES {
        for probe in TECH_PROBES.iter().filter(|probe| probe.matches(&section)) {
            technologies.push(probe.name.to_string());
        }
    }

    technologies.into_vec()
}

/// Returns the body of the tech-stack section, if any.
fn find_section(readme: &str) -> Option<String> {
    let lines: Vec<&str> = readme.lines().collect();
    let headings = headings(&lines);

    let contains = |heading: &&Heading, needle: &str| heading.text.to_lowercase().contains(needle);
    let index = headings
        .iter()
        .position(|h| contains(&h, "tech stack"))
        .or_else(|| {
            headings
                .iter()
                .position(|h| FALLBACK_HEADINGS.iter().any(|needle| contains(&h, needle)))
        })?;

    let heading = &headings[index];
    let end = headings[index + 1..]
        .iter()
        .find(|next| next.level <= heading.level)
        .map_or(lines.len(), |next| next.line);

    trace!(heading = heading.text, "Found tech stack section");
    Some(lines[heading.line + 1..end].join("\n"))
}

/// Collects headings outside fenced code blocks.
fn headings<'a>(lines: &[&'a str]) -> Vec<Heading<'a>> {
    let mut in_fence = false;
    let mut found = Vec::new();
    for (line_index, line) in lines.iter().enumerate() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        if let Some(caps) = HEADING.captures(line) {
            found.push(Heading {
                line: line_index,
                level: caps[1].len(),
                text: caps.get(2).map_or("", |m| m.as_str()),
            });
        }
    }
    found
}

/// Applies the label patterns in order; the first match wins.
fn match_label(line: &str) -> Option<(&str, &str)> {
    LABEL_PATTERNS.iter().find_map(|pattern| {
        let caps = pattern.regex.captures(line)?;
        Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
    })
}

fn is_wanted_category(label: &str) -> bool {
    let normalized: String = label
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_ascii_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .any(|keyword| normalized == *keyword || normalized.contains(keyword))
}

/// Collects the lines indented below a label with no inline values.
///
/// Returns the lines joined by newlines and how many lines were consumed.
fn nested_values(lines: &[&str], parent_indent: usize) -> (String, usize) {
    let mut consumed = 0;
    let mut nested = Vec::new();
    for line in lines {
        if !line.trim().is_empty() {
            if indent(line) <= parent_indent {
                break;
            }
            nested.push(line.trim());
        }
        consumed += 1;
    }
    (nested.join("\n"), consumed)
}

fn indent(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

/// Splits a value list into cleaned technology fragments.
///
/// Parenthetical asides are removed before splitting so that separators
/// inside them never produce fragments.
fn split_values(values: &str) -> Vec<String> {
    PARENTHETICAL
        .replace_all(values, "")
        .split(VALUE_SEPARATORS)
        .map(|fragment| {
            let fragment = MARKUP.replace_all(fragment, "$1");
            fragment
                .trim_matches(STRAY_BULLETS)
                .trim_end_matches('.')
                .trim()
                .to_string()
        })
        .filter(|fragment| {
            !fragment.is_empty() && !fragment.ends_with(':') && !CONNECTIVE.is_match(fragment)
        })
        .collect()
}

/// Technology names deduplicated case-insensitively, in first-seen order.
#[derive(Default)]
struct TechList {
    names: Vec<String>,
    seen: HashSet<String>,
}

impl TechList {
    fn push(&mut self, name: String) {
        if !name.is_empty() && self.seen.insert(name.to_lowercase()) {
            self.names.push(name);
        }
    }

    fn len(&self) -> usize {
        self.names.len()
    }

    fn into_vec(self) -> Vec<String> {
        self.names
    }
}
