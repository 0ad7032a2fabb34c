//! Tech-stack aggregation.
//!
//! Merges per-repository language byte counts with README-declared
//! technologies into a single ranked list. README entries receive synthetic
//! weights large enough to dominate raw byte counts, and the profile README
//! outweighs everything else.

use crate::github::LanguageBytes;
use crate::portfolio::ProjectCard;
use serde::Serialize;
use std::collections::HashMap;

/// Number of entries returned.
pub const TOP_ENTRIES: usize = 12;

/// Weight of the first technology listed in a project README.
pub const README_BASE_WEIGHT: u64 = 10_000;

/// Weight lost per position in a project README list.
pub const README_WEIGHT_STEP: u64 = 100;

/// Weight of the first technology listed in the profile README.
pub const PROFILE_BASE_WEIGHT: u64 = 50_000;

/// Weight lost per position in the profile README list.
pub const PROFILE_WEIGHT_STEP: u64 = 1_000;

/// One ranked technology.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechStackEntry {
    /// Display name, as first seen.
    pub name: String,

    /// Accumulated weight (bytes plus synthetic README weight).
    pub weight: u64,

    /// Share of the grand total weight, 0-100.
    pub percentage: f64,
}

/// Aggregates languages and README technologies into the top [`TOP_ENTRIES`] entries.
///
/// `languages` is keyed by repository name. Names are merged
/// case-insensitively. Ties keep first-seen order, so identical inputs always
/// give identical output.
#[must_use]
pub fn aggregate_tech_stack(
    projects: &[ProjectCard],
    languages: &HashMap<String, LanguageBytes>,
    profile_stack: &[String],
) -> Vec<TechStackEntry> {
    let mut totals = WeightTable::default();

    for project in projects {
        if let Some(bytes) = languages.get(&project.repository.name) {
            // HashMap order is unspecified; sort so first-seen spelling is stable.
            let mut bytes: Vec<(&String, &u64)> = bytes.iter().collect();
            bytes.sort();
            for (language, count) in bytes {
                totals.add(language, *count);
            }
        }
        totals.add_ranked(&project.technologies, README_BASE_WEIGHT, README_WEIGHT_STEP);
    }
    totals.add_ranked(profile_stack, PROFILE_BASE_WEIGHT, PROFILE_WEIGHT_STEP);

    totals.into_top(TOP_ENTRIES)
}

/// Weights keyed by lowercase name, remembering insertion order.
#[derive(Default)]
struct WeightTable {
    entries: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl WeightTable {
    fn add(&mut self, name: &str, weight: u64) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        let key = name.to_lowercase();
        match self.index.get(&key) {
            Some(&slot) => self.entries[slot].1 += weight,
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push((name.to_string(), weight));
            }
        }
    }

    fn add_ranked(&mut self, names: &[String], base: u64, step: u64) {
        for (position, name) in names.iter().enumerate() {
            let penalty = step.saturating_mul(position as u64);
            self.add(name, base.saturating_sub(penalty));
        }
    }

    fn into_top(self, limit: usize) -> Vec<TechStackEntry> {
        let total: u64 = self.entries.iter().map(|(_, weight)| weight).sum();
        let mut entries = self.entries;
        entries.sort_by(|a, b| b.1.cmp(&a.1));

        entries
            .into_iter()
            .take(limit)
            .map(|(name, weight)| TechStackEntry {
                name,
                weight,
                percentage: if total == 0 {
                    0.0
                } else {
                    weight as f64 / total as f64 * 100.0
                },
            })
            .collect()
    }
}
