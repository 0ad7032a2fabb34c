//! Topic priority tiers.

use serde::Serialize;

/// Priority tier derived from a repository's topics. Lower ranks sort first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TopicTier {
    /// Tagged `ongoing`.
    Ongoing,
    /// Tagged `featured`.
    Featured,
    /// Tagged `case-study`.
    CaseStudy,
    /// No tier topic.
    Unclassified,
}

impl TopicTier {
    /// Returns the numeric rank of the tier.
    #[must_use]
    pub fn rank(self) -> u16 {
        match self {
            Self::Ongoing => 1,
            Self::Featured => 2,
            Self::CaseStudy => 3,
            Self::Unclassified => 999,
        }
    }

    /// Maps a single topic to its tier.
    #[must_use]
    pub fn from_topic(topic: &str) -> Self {
        match topic.trim().to_ascii_lowercase().as_str() {
            "ongoing" => Self::Ongoing,
            "featured" => Self::Featured,
            "case-study" => Self::CaseStudy,
            _ => Self::Unclassified,
        }
    }

    /// Returns the best tier among `topics`.
    #[must_use]
    pub fn of(topics: &[String]) -> Self {
        topics
            .iter()
            .map(|topic| Self::from_topic(topic))
            .min()
            .unwrap_or(Self::Unclassified)
    }
}
