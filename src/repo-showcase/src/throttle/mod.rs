//! Batched request scheduling.
//!
//! Upstream lookups are issued in small fixed-size batches. Calls inside a batch
//! run concurrently and the batch settles before the next one starts, with a
//! pause in between to stay under the API's secondary rate limits.

mod rate_limit;

pub use rate_limit::{
    check_core_rate_limit, ensure_core_rate_limit, wait_duration, RateLimitInfo,
};

use futures::future::join_all;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Batch size for language byte lookups.
pub const LANGUAGE_BATCH_SIZE: usize = 5;

/// Batch size for README lookups.
pub const README_BATCH_SIZE: usize = 3;

/// Default pause between two batches.
pub const DEFAULT_BATCH_PAUSE: Duration = Duration::from_millis(250);

/// How a list of calls is split into batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPlan {
    /// Maximum calls in flight at once. Zero is treated as one.
    pub size: usize,

    /// Pause between two consecutive batches.
    pub pause: Duration,
}

impl BatchPlan {
    /// Creates a plan with the given batch size and pause.
    #[must_use]
    pub fn new(size: usize, pause: Duration) -> Self {
        Self { size, pause }
    }
}

/// A delay between batches.
///
/// Injected so that scheduling can be exercised without waiting on the wall clock.
pub trait Pause: Send + Sync {
    /// Waits for `duration`.
    fn pause(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// [`Pause`] backed by `tokio::time::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPause;

impl Pause for TokioPause {
    fn pause(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}

/// Runs `task` over `items` in batches of `plan.size`.
///
/// Each batch runs concurrently and completes before the next starts. `pause`
/// is invoked between batches, never before the first or after the last.
/// Results are returned in input order.
pub async fn run_in_batches<T, R, F, Fut, P>(
    items: Vec<T>,
    plan: BatchPlan,
    pause: &P,
    mut task: F,
) -> Vec<R>
where
    F: FnMut(T) -> Fut,
    Fut: Future<Output = R>,
    P: Pause,
{
    let size = plan.size.max(1);
    let mut results = Vec::with_capacity(items.len());
    let mut remaining = items.into_iter().peekable();
    let mut batch_index = 0usize;

    while remaining.peek().is_some() {
        if batch_index > 0 {
            pause.pause(plan.pause).await;
        }

        let batch: Vec<Fut> = remaining.by_ref().take(size).map(&mut task).collect();
        debug!(batch = batch_index, calls = batch.len(), "Running batch");
        results.extend(join_all(batch).await);
        batch_index += 1;
    }

    results
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingPause;
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn pauses_only_between_batches() {
        let pause = RecordingPause::default();
        let plan = BatchPlan::new(5, Duration::from_millis(100));

        let items: Vec<u32> = (0..12).collect();

        let results = run_in_batches(items, plan, &pause, |n| async move { n * 2 }).await;

        assert_eq!(results, (0..12).map(|n| n * 2).collect::<Vec<_>>());
        // 12 items in batches of 5 -> 3 batches -> 2 pauses.
        assert_eq!(pause.recorded(), vec![Duration::from_millis(100); 2]);
    }

    #[tokio::test]
    async fn empty_input_never_pauses() {
        let pause = RecordingPause::default();
        let plan = BatchPlan::new(3, Duration::ZERO);

        let results: Vec<u32> =
            run_in_batches(Vec::new(), plan, &pause, |n| async move { n }).await;

        assert!(results.is_empty());
        assert!(pause.recorded().is_empty());
    }

    #[tokio::test]
    async fn limits_calls_in_flight_to_batch_size() {
        let pause = RecordingPause::default();
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let items: Vec<u32> = (0..7).collect();
        let plan = BatchPlan::new(3, Duration::ZERO);

        run_in_batches(items, plan, &pause, |_| {
            let in_flight = Arc::clone(&in_flight);
            let peak = Arc::clone(&peak);
            async move {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::task::yield_now().await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
            }
        })
        .await;

        assert_eq!(peak.load(Ordering::SeqCst), 3);
        assert_eq!(in_flight.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn zero_batch_size_runs_one_at_a_time() {
        let pause = RecordingPause::default();
        let plan = BatchPlan::new(0, Duration::ZERO);

        let results =
            run_in_batches(vec!["a", "b"], plan, &pause, |s| async move { s.to_uppercase() }).await;

        assert_eq!(results, vec!["A", "B"]);
        assert_eq!(pause.recorded().len(), 1);
    }
}
