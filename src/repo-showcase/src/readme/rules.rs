//! Ordered heuristic tables for README parsing.
//!
//! Each table is evaluated top to bottom and the first matching rule wins.
//! New heuristics are appended without touching existing entries.

use once_cell::sync::Lazy;
use regex::Regex;

/// Label categories whose values are collected from a tech-stack section.
pub(crate) const CATEGORY_KEYWORDS: &[&str] = &["frontend", "backend", "framework"];

/// A bullet-line shape that yields a `(label, values)` pair.
pub(crate) struct LabelPattern {
    pub(crate) name: &'static str,
    pub(crate) regex: Regex,
}

/// Bullet-line shapes; capture 1 is the label, capture 2 the value list.
///
/// Only the table row requires inline values. An empty value list means the
/// values follow as nested bullets.
pub(crate) static LABEL_PATTERNS: Lazy<Vec<LabelPattern>> = Lazy::new(|| {
    [
        // * **Frontend:** React, Vite
        ("bullet-bold-inner-colon", r"^\s*[-*+]\s+\*\*([^*]+?):\*\*\s*(.*)$"),
        // - **Frontend**: React, Vite
        ("bullet-bold-outer-colon", r"^\s*[-*+]\s+\*\*([^*]+?)\*\*\s*:\s*(.*)$"),
        // - __Frontend:__ React / - __Frontend__: React
        ("bullet-underline", r"^\s*[-*+]\s+__([^_:]+):?__\s*:?\s*(.*)$"),
        // - Frontend: React, Vite
        ("bullet-plain", r"^\s*[-*+]\s+([A-Za-z][\w ./&+-]*?)\s*:\s*(.*)$"),
        // **Frontend:** React, Vite
        ("bold-inner-colon", r"^\s*\*\*([^*]+?):\*\*\s*(.*)$"),
        // **Frontend**: React, Vite
        ("bold-outer-colon", r"^\s*\*\*([^*]+?)\*\*\s*:\s*(.*)$"),
        // | Frontend | React, Vite |
        ("table-row", r"^\s*\|\s*([^|]+?)\s*\|\s*(.+?)\s*\|?\s*$"),
    ]
    .into_iter()
    .map(|(name, pattern)| LabelPattern {
        name,
        regex: Regex::new(pattern).expect("label pattern is valid"),
    })
    .collect()
});

/// Maps a raw technology token onto a canonical spelling.
pub(crate) struct NameRule {
    pattern: Regex,
    unless: Option<Regex>,
    canonical: &'static str,
}

impl NameRule {
    fn new(pattern: &str, canonical: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("name rule is valid"),
            unless: None,
            canonical,
        }
    }

    fn unless(mut self, pattern: &str) -> Self {
        self.unless = Some(Regex::new(pattern).expect("name rule exclusion is valid"));
        self
    }

    fn apply(&self, token: &str) -> Option<&'static str> {
        let excluded = self.unless.as_ref().is_some_and(|re| re.is_match(token));
        (!excluded && self.pattern.is_match(token)).then_some(self.canonical)
    }
}

pub(crate) static NAME_RULES: Lazy<Vec<NameRule>> = Lazy::new(|| {
    vec![
        NameRule::new(r"(?i)\bnext\.?js\b|^next$", "Next.js"),
        NameRule::new(r"(?i)tailwind", "Tailwind CSS"),
        // Only the bare token; "React Native" keeps its own name.
        NameRule::new(r"(?i)^react(?:\.?js)?$", "React"),
        NameRule::new(r"(?i)^node(?:\.?js)?$", "Node.js"),
        NameRule::new(r"(?i)^vue(?:\.?js)?$", "Vue.js"),
        NameRule::new(r"(?i)^express(?:\.?js)?$", "Express"),
        NameRule::new(r"(?i)^nest(?:\.?js)?$", "NestJS"),
        NameRule::new(r"(?i)^postgres(?:ql)?$", "PostgreSQL"),
        NameRule::new(r"(?i)^mongo(?:db)?$", "MongoDB"),
        NameRule::new(r"(?i)^graphql$", "GraphQL"),
        NameRule::new(r"(?i)^fastapi$", "FastAPI"),
        NameRule::new(r"(?i)^mysql$", "MySQL"),
        NameRule::new(r"(?i)^sqlite$", "SQLite"),
        NameRule::new(r"(?i)^html5?$", "HTML"),
        NameRule::new(r"(?i)^css3?$", "CSS"),
        NameRule::new(r"(?i)^(?:dotnet|\.net)$", ".NET"),
        NameRule::new(r"(?i)\btypescript\b|^(?:.*\s)?ts$", "TypeScript"),
        NameRule::new(r"(?i)\bjavascript\b|^(?:.*\s)?js$", "JavaScript").unless(r"(?i)next"),
    ]
});

/// Normalizes a technology token using [`NAME_RULES`], falling back to title case.
pub(crate) fn normalize_tech_name(token: &str) -> String {
    let token = token.trim();
    NAME_RULES
        .iter()
        .find_map(|rule| rule.apply(token))
        .map(str::to_string)
        .unwrap_or_else(|| title_case(token))
}

/// Uppercases the first character of each whitespace-separated word.
fn title_case(token: &str) -> String {
    token
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// A technology detected anywhere in free text.
///
/// A match whose optional `not` group participated is ignored, which lets a
/// probe reject a longer name that merely starts with it.
pub(crate) struct TechProbe {
    pub(crate) name: &'static str,
    pattern: Regex,
}

impl TechProbe {
    pub(crate) fn matches(&self, text: &str) -> bool {
        self.pattern
            .captures_iter(text)
            .any(|caps| caps.name("not").is_none())
    }
}

pub(crate) static TECH_PROBES: Lazy<Vec<TechProbe>> = Lazy::new(|| {
    [
        ("React Native", r"(?i)\breact[\s-]native\b"),
        ("React", r"(?i)\breact(?:\.?js)?\b(?P<not>[\s-]+native)?"),
        ("Next.js", r"(?i)\bnext\.?js\b"),
        ("Vue.js", r"(?i)\bvue(?:\.?js)?\b"),
        ("Angular", r"(?i)\bangular\b"),
        ("Svelte", r"(?i)\bsvelte(?:kit)?\b"),
        ("Node.js", r"(?i)\bnode(?:\.?js)?\b"),
        ("Express", r"(?i)\bexpress(?:\.?js)?\b"),
        ("TypeScript", r"(?i)\btypescript\b"),
        ("JavaScript", r"(?i)\bjavascript\b"),
        ("Python", r"(?i)\bpython\b"),
        ("Django", r"(?i)\bdjango\b"),
        ("Flask", r"(?i)\bflask\b"),
        ("FastAPI", r"(?i)\bfastapi\b"),
        ("Tailwind CSS", r"(?i)\btailwind(?:\s*css)?\b"),
        ("PostgreSQL", r"(?i)\bpostgres(?:ql)?\b"),
        ("MongoDB", r"(?i)\bmongo(?:db)?\b"),
        ("Redis", r"(?i)\bredis\b"),
        ("Docker", r"(?i)\bdocker\b"),
        ("GraphQL", r"(?i)\bgraphql\b"),
        ("Firebase", r"(?i)\bfirebase\b"),
        ("Supabase", r"(?i)\bsupabase\b"),
        ("Prisma", r"(?i)\bprisma\b"),
        ("Rust", r"(?i)\brust\b"),
        // "Go" is an ordinary English word; only accept it as a list item.
        (
            "Go",
            r"(?m)(?:^|[,|•·:(/])[ \t]*(?:[-*+][ \t]+)?Go[ \t]*(?:$|[,|•·)/])|(?i:\bgolang\b)",
        ),
    ]
    .into_iter()
    .map(|(name, pattern)| TechProbe {
        name,
        pattern: Regex::new(pattern).expect("tech probe is valid"),
    })
    .collect()
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_known_names() {
        assert_eq!(normalize_tech_name("nextjs"), "Next.js");
        assert_eq!(normalize_tech_name("Next.js 14"), "Next.js");
        assert_eq!(normalize_tech_name("TailwindCSS"), "Tailwind CSS");
        assert_eq!(normalize_tech_name("react"), "React");
        assert_eq!(normalize_tech_name("node.js"), "Node.js");
        assert_eq!(normalize_tech_name("TS"), "TypeScript");
        assert_eq!(normalize_tech_name("typescript"), "TypeScript");
        assert_eq!(normalize_tech_name("Vanilla JS"), "JavaScript");
        assert_eq!(normalize_tech_name("javascript"), "JavaScript");
    }

    #[test]
    fn title_cases_unknown_names() {
        assert_eq!(normalize_tech_name("react native"), "React Native");
        assert_eq!(normalize_tech_name("spring boot"), "Spring Boot");
        assert_eq!(normalize_tech_name("PostGIS"), "PostGIS");
    }

    #[test]
    fn react_probe_ignores_react_native() {
        let react = TECH_PROBES.iter().find(|p| p.name == "React").unwrap();
        assert!(!react.matches("Built with React Native and Expo"));
        assert!(react.matches("React Native app with a React web dashboard"));
        assert!(react.matches("uses react.js"));
    }

    #[test]
    fn every_label_pattern_has_two_groups() {
        for pattern in LABEL_PATTERNS.iter() {
            assert_eq!(pattern.regex.captures_len(), 3, "{}", pattern.name);
        }
    }
}
