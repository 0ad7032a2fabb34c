//! Repository filtering and ranking.
//!
//! Forks, archived and private repositories never reach the portfolio. An
//! optional topic allow-list narrows the set further, and the survivors are
//! ordered by [`TopicTier`] and then by recency.

mod tier;

pub use tier::TopicTier;

use crate::github::Repository;
use std::cmp::Reverse;
use std::collections::HashSet;
use tracing::debug;

/// Drops forks, archived and private repositories, then applies the topic allow-list.
///
/// An empty allow-list keeps every remaining repository. Topic comparison is
/// case-insensitive.
#[must_use]
pub fn filter_repositories(
    repositories: Vec<Repository>,
    allow_list: &[String],
) -> Vec<Repository> {
    let allowed: HashSet<String> = allow_list
        .iter()
        .map(|topic| topic.trim().to_lowercase())
        .filter(|topic| !topic.is_empty())
        .collect();

    repositories
        .into_iter()
        .filter(|repo| !repo.fork && !repo.archived && !repo.private)
        .filter(|repo| {
            allowed.is_empty()
                || repo
                    .topics
                    .iter()
                    .any(|topic| allowed.contains(&topic.to_lowercase()))
        })
        .collect()
}

/// Sorts repositories by topic tier, then by most recently updated.
///
/// The sort is stable: equal keys keep their input order.
#[must_use]
pub fn rank_repositories(mut repositories: Vec<Repository>) -> Vec<Repository> {
    repositories.sort_by_key(|repo| (TopicTier::of(&repo.topics).rank(), Reverse(repo.updated_at)));
    repositories
}

/// Filters and ranks in one step.
#[must_use]
pub fn filter_and_rank(repositories: Vec<Repository>, allow_list: &[String]) -> Vec<Repository> {
    let total = repositories.len();
    let ranked = rank_repositories(filter_repositories(repositories, allow_list));
    debug!(total, kept = ranked.len(), "Filtered repositories");
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::fixtures::repository;
    use chrono::{Duration, TimeZone, Utc};

    fn with_topics(name: &str, topics: &[&str]) -> Repository {
        let mut repo = repository(name);
        repo.topics = topics.iter().map(|t| t.to_string()).collect();
        repo
    }

    fn names(repos: &[Repository]) -> Vec<&str> {
        repos.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn drops_forks_archived_and_private() {
        let mut fork = repository("fork");
        fork.fork = true;
        let mut archived = repository("archived");
        archived.archived = true;
        let mut private = repository("private");
        private.private = true;

        let kept = filter_repositories(vec![fork, repository("keep"), archived, private], &[]);

        assert_eq!(names(&kept), vec!["keep"]);
        assert!(kept.iter().all(|r| !r.fork && !r.archived && !r.private));
    }

    #[test]
    fn allow_list_is_case_insensitive() {
        let repos = vec![
            with_topics("a", &["Portfolio"]),
            with_topics("b", &["misc"]),
            with_topics("c", &[]),
        ];

        let kept = filter_repositories(repos, &["portfolio".to_string(), " ".to_string()]);

        assert_eq!(names(&kept), vec!["a"]);
    }

    #[test]
    fn blank_allow_list_keeps_everything() {
        let repos = vec![with_topics("a", &[]), with_topics("b", &["x"])];
        let kept = filter_repositories(repos, &["".to_string()]);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn ranks_by_tier_then_recency() {
        let base = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let mut old_featured = with_topics("old-featured", &["featured"]);
        old_featured.updated_at = base - Duration::days(30);
        let mut new_featured = with_topics("new-featured", &["featured"]);
        new_featured.updated_at = base;
        let mut plain = with_topics("plain", &["rust"]);
        plain.updated_at = base + Duration::days(1);
        let ongoing = with_topics("ongoing", &["ongoing"]);
        let study = with_topics("study", &["case-study"]);

        let ranked = rank_repositories(vec![plain, study, old_featured, ongoing, new_featured]);

        assert_eq!(
            names(&ranked),
            vec!["ongoing", "new-featured", "old-featured", "study", "plain"]
        );
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let ranked = rank_repositories(vec![
            with_topics("first", &["featured"]),
            with_topics("second", &["featured"]),
            with_topics("third", &["featured"]),
        ]);

        assert_eq!(names(&ranked), vec!["first", "second", "third"]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(filter_and_rank(Vec::new(), &["x".to_string()]).is_empty());
    }
}
