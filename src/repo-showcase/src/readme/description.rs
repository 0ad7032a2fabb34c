//! Short description extraction.

use once_cell::sync::Lazy;
use regex::Regex;

/// Non-empty lines examined after the title.
const MAX_SCANNED_LINES: usize = 5;

/// Content lines collected at most.
const MAX_COLLECTED_LINES: usize = 2;

/// Collection stops once the joined text is longer than this.
const COLLECT_LIMIT: usize = 150;

/// Maximum length of the returned description.
const MAX_LENGTH: usize = 120;

/// A sentence or word cut must land beyond this position.
const MIN_CUT_POSITION: usize = 80;

/// Shorter results are not meaningful.
const MIN_LENGTH: usize = 20;

const ELLIPSIS: &str = "...";

static LINKS_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\s*\[[^\]]*\]\([^)]*\)\s*[|·•,-]?\s*)+$").unwrap());
static HORIZONTAL_RULE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:[-*_]\s*){3,}$").unwrap());
static SETEXT_UNDERLINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:=+|-+)\s*$").unwrap());

static INLINE_IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[[^\]]*\]\([^)]*\)").unwrap());
static INLINE_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\([^)]*\)").unwrap());
static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*|__([^_]+)__").unwrap());
static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*([^*\s][^*]*)\*|\b_([^_]+)_\b").unwrap());
static CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").unwrap());
static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// A rule that rejects a line as non-prose.
type LineFilter = fn(&str) -> bool;

/// Lines matching any of these are never part of a description.
const SKIPPED_LINES: &[LineFilter] = &[
    |line| line.starts_with('#'),
    |line| line.starts_with("![") || line.starts_with("[!["),
    |line| LINKS_ONLY.is_match(line),
    |line| line.starts_with("```") || line.starts_with("~~~"),
    |line| HORIZONTAL_RULE.is_match(line),
    |line| line.starts_with('|'),
    |line| line.starts_with('<'),
    |line| SETEXT_UNDERLINE.is_match(line),
];

/// Extracts a short prose description from README text.
///
/// Returns `None` when no line of prose of at least 20 characters is found.
pub fn extract_description(readme: &str) -> Option<String> {
    let lines: Vec<&str> = readme.lines().map(str::trim).collect();
    let start = skip_title(&lines);

    let mut collected: Vec<String> = Vec::new();
    for line in lines[start..]
        .iter()
        .filter(|line| !line.is_empty())
        .take(MAX_SCANNED_LINES)
    {
        if SKIPPED_LINES.iter().any(|skip| skip(line)) {
            continue;
        }

        let cleaned = strip_inline_markup(line);
        if cleaned.is_empty() {
            continue;
        }

        collected.push(cleaned);
        if collected.len() >= MAX_COLLECTED_LINES
            || collected.join(" ").chars().count() > COLLECT_LIMIT
        {
            break;
        }
    }

    let description = truncate(&collected.join(" "));
    (description.chars().count() >= MIN_LENGTH).then_some(description)
}

/// Returns the index of the first line after leading blanks and titles.
fn skip_title(lines: &[&str]) -> usize {
    let mut index = 0;
    while index < lines.len() {
        let line = lines[index];
        if line.is_empty() || line.starts_with('#') {
            index += 1;
        } else if lines
            .get(index + 1)
            .is_some_and(|next| SETEXT_UNDERLINE.is_match(next))
        {
            index += 2;
        } else {
            break;
        }
    }
    index.min(lines.len())
}

/// Removes link, bold, italic, code and HTML markup.
fn strip_inline_markup(line: &str) -> String {
    let text = INLINE_IMAGE.replace_all(line, "");
    let text = INLINE_LINK.replace_all(&text, "$1");
    let text = BOLD.replace_all(&text, "$1$2");
    let text = ITALIC.replace_all(&text, "$1$2");
    let text = CODE.replace_all(&text, "$1");
    let text = HTML_TAG.replace_all(&text, "");
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// Shortens text to at most 120 characters.
///
/// Prefers the last sentence end beyond position 80, then the last word
/// boundary beyond position 80 with an ellipsis, then a hard cut with an ellipsis.
fn truncate(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= MAX_LENGTH {
        return text.to_string();
    }

    let window = &chars[..MAX_LENGTH];
    if let Some(period) = window.iter().rposition(|&c| c == '.') {
        if period > MIN_CUT_POSITION {
            return window[..=period].iter().collect();
        }
    }

    let room = MAX_LENGTH - ELLIPSIS.len();
    let head = &chars[..room];
    match head.iter().rposition(|c| c.is_whitespace()) {
        Some(space) if space > MIN_CUT_POSITION => {
            let cut: String = head[..space].iter().collect();
            format!("{}{ELLIPSIS}", cut.trim_end())
        }
        _ => format!("{}{ELLIPSIS}", head.iter().collect::<String>()),
    }
}
