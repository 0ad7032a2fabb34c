//! Core API rate limit guard.

use super::Pause;
use octocrab::Octocrab;
use std::time::Duration;
use tracing::{info, warn};

/// Maximum time to wait for rate limit reset (1 hour).
const MAX_WAIT_SECS: u64 = 3600;

/// Minimum remaining requests before proactively waiting.
const MIN_REMAINING_THRESHOLD: u32 = 5;

/// Rate limit information for the core API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitInfo {
    /// Requests remaining in the current window.
    pub remaining: u32,

    /// Unix timestamp when the rate limit resets.
    pub reset: u64,

    /// Total requests allowed per window.
    pub limit: u32,
}

/// Checks the current rate limit status for the core API.
///
/// # Errors
///
/// Returns an error if the rate limit API call fails.
pub async fn check_core_rate_limit(octocrab: &Octocrab) -> Result<RateLimitInfo, octocrab::Error> {
    let rate_limit = octocrab.ratelimit().get().await?;
    let core = &rate_limit.resources.core;

    Ok(RateLimitInfo {
        remaining: core.remaining as u32,
        reset: core.reset,
        limit: core.limit as u32,
    })
}

/// Computes how long to wait before issuing more requests.
///
/// Returns `None` while at least `MIN_REMAINING_THRESHOLD` requests remain or
/// the window has already reset. Waits are capped at one hour.
#[must_use]
pub fn wait_duration(info: &RateLimitInfo, now_secs: u64) -> Option<Duration> {
    if info.remaining >= MIN_REMAINING_THRESHOLD || info.reset <= now_secs {
        return None;
    }

    let wait_secs = info.reset - now_secs;
    if wait_secs > MAX_WAIT_SECS {
        warn!(
            wait_secs,
            max_wait = MAX_WAIT_SECS,
            "Rate limit reset too far in future, capping wait time"
        );
    }

    Some(Duration::from_secs(wait_secs.min(MAX_WAIT_SECS)))
}

/// Ensures sufficient core rate limit before a round of enrichment calls.
///
/// Returns `true` if the guard paused.
///
/// # Errors
///
/// Returns an error if the rate limit check fails.
pub async fn ensure_core_rate_limit<P: Pause>(
    octocrab: &Octocrab,
    pause: &P,
) -> Result<bool, octocrab::Error> {
    let info = check_core_rate_limit(octocrab).await?;
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    match wait_duration(&info, now) {
        Some(wait) => {
            info!(
                remaining = info.remaining,
                wait_secs = wait.as_secs(),
                "Rate limit low, waiting for reset"
            );
            pause.pause(wait).await;
            Ok(true)
        }
        None => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_wait_with_enough_remaining() {
        let info = RateLimitInfo {
            remaining: 100,
            reset: 2_000,
            limit: 5_000,
        };

        assert_eq!(wait_duration(&info, 1_000), None);
    }

    #[test]
    fn no_wait_when_reset_passed() {
        let info = RateLimitInfo {
            remaining: 1,
            reset: 500,
            limit: 60,
        };

        assert_eq!(wait_duration(&info, 1_000), None);
    }

    #[test]
    fn waits_until_reset_when_low() {
        let info = RateLimitInfo {
            remaining: 2,
            reset: 1_090,
            limit: 60,
        };

        assert_eq!(wait_duration(&info, 1_000), Some(Duration::from_secs(90)));
    }

    #[test]
    fn caps_wait_at_one_hour() {
        let info = RateLimitInfo {
            remaining: 0,
            reset: 1_000 + 10 * MAX_WAIT_SECS,
            limit: 60,
        };

        assert_eq!(
            wait_duration(&info, 1_000),
            Some(Duration::from_secs(MAX_WAIT_SECS))
        );
    }
}
