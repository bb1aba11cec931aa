// src/rounds.rs
// =============================================================================
// This module implements the discovery loop: rounds of parallel fetches that
// keep going until the dedup tracker says we are saturated.
//
// How it works:
// 1. Start a fresh tracker
// 2. Launch exactly `parallelism` fetch-and-record futures - one round
// 3. Wait for the WHOLE round to finish (a full barrier, via try_join_all)
// 4. If any fetch in the round pushed the tracker over its duplicate limit,
//    stop; otherwise go again
//
// Rounds never overlap: not a single fetch of round N+1 is created before
// every fetch of round N has come back. That keeps the concurrency model dead
// simple - the only shared state is the tracker, and the only coordination
// point is the barrier.
//
// Failure policy: one bad fetch anywhere in a round kills the whole run.
// try_join_all hands us the first error and drops the sibling futures; the
// partially-filled tracker is dropped right along with it, so a failed run
// never leaks a half-built collection.
//
// Rust concepts:
// - Futures are lazy: building the round's Vec does no work until awaited
// - try_join_all: Await many futures, short-circuit on the first Err
// - Borrowing across .await: the futures borrow tracker/fetcher by reference
// =============================================================================

use std::time::{Duration, Instant};

use futures::future::try_join_all;

use crate::error::YeenError;
use crate::fetch::YeenFetcher;
use crate::saturation::SaturationTracker;
use crate::yeen::Yeen;

/// How many fetches fly in one round unless the caller says otherwise
pub const DEFAULT_PARALLELISM: usize = 16;

/// How many duplicate sightings it takes to call the pool saturated
pub const DEFAULT_SATURATION_LIMIT: usize = 200;

// The final, frozen outcome of a discovery run
#[derive(Debug)]
pub struct RunResult {
    /// Every distinct yeen discovered before saturation
    pub yeens: Vec<Yeen>,
    /// Wall-clock time the discovery loop took
    pub elapsed: Duration,
}

// Runs fetch rounds until the duplicate-hit limit is reached
//
// Parameters:
//   fetcher: where yeens come from (the real client, or a stub in tests)
//   parallelism: fetches per round (must be > 0, or the loop never advances)
//   limit: duplicate sightings that declare saturation (must be > 0)
//
// Returns: the deduplicated set plus how long discovery took, or the first
// fetch error - in which case everything gathered so far is discarded
pub async fn run_until_saturated<F>(
    fetcher: &F,
    parallelism: usize,
    limit: usize,
) -> Result<RunResult, YeenError>
where
    F: YeenFetcher + ?Sized,
{
    let tracker = SaturationTracker::new(limit);
    let started = Instant::now();

    loop {
        // Build one round: exactly `parallelism` fetch-and-record futures.
        // Each future fetches a yeen and feeds it straight to the tracker,
        // carrying back the tracker's "saturated yet?" answer.
        let mut round = Vec::with_capacity(parallelism);
        for _ in 0..parallelism {
            round.push(async {
                let yeen = fetcher.fetch_one().await?;
                Ok::<bool, YeenError>(tracker.add(yeen))
            });
        }

        // The barrier: the whole round lands before we look at the answers
        let saturated_flags = try_join_all(round).await?;

        if saturated_flags.contains(&true) {
            break;
        }
    }

    Ok(RunResult {
        yeens: tracker.into_yeens(),
        elapsed: started.elapsed(),
    })
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a Vec of async blocks?
//    - Every `async { ... }` in the loop body has the same anonymous type,
//      so they can live in one Vec
//    - Nothing runs yet - futures in Rust do nothing until polled
//
// 2. What makes this a barrier?
//    - try_join_all only resolves once EVERY future in the round has
//      resolved (or one of them fails)
//    - The next round's futures are not even constructed until then
//
// 3. Why does the saturation check wait for the round boundary?
//    - add() returns the stop signal to the future that saw it, but the
//      driver only reads the collected answers after the join
//    - So a run always finishes its in-flight round before stopping -
//      that is why stub tests count fetches in whole-round multiples
//
// 4. Why `Ok::<bool, YeenError>`?
//    - The async block needs its error type pinned down for `?` to compile
//    - The turbofish on Ok is the cheapest place to write it
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    // Serves yeens from a fixed cycle of URLs, forever
    struct CycleFetcher {
        urls: Vec<&'static str>,
        cursor: AtomicUsize,
    }

    impl CycleFetcher {
        fn new(urls: Vec<&'static str>) -> Self {
            Self {
                urls,
                cursor: AtomicUsize::new(0),
            }
        }

        fn fetches(&self) -> usize {
            self.cursor.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl YeenFetcher for CycleFetcher {
        async fn fetch_one(&self) -> Result<Yeen, YeenError> {
            let i = self.cursor.fetch_add(1, Ordering::SeqCst);
            Ok(Yeen::from_url(self.urls[i % self.urls.len()].to_string()))
        }

        async fn download(&self, _yeen: &Yeen, _dir: &Path) -> Result<PathBuf, YeenError> {
            unreachable!("discovery tests never download")
        }
    }

    // Fails the n-th fetch (0-based) with a 500; serves distinct URLs otherwise
    struct FailNthFetcher {
        fail_at: usize,
        cursor: AtomicUsize,
    }

    #[async_trait]
    impl YeenFetcher for FailNthFetcher {
        async fn fetch_one(&self) -> Result<Yeen, YeenError> {
            let i = self.cursor.fetch_add(1, Ordering::SeqCst);
            if i == self.fail_at {
                return Err(YeenError::Http {
                    url: "https://stub/broken".to_string(),
                    status: 500,
                });
            }
            Ok(Yeen::from_url(format!("https://stub/{i}.jpg")))
        }

        async fn download(&self, _yeen: &Yeen, _dir: &Path) -> Result<PathBuf, YeenError> {
            unreachable!("discovery tests never download")
        }
    }

    // Always serves the same URL, with a variable artificial delay, and
    // records whether any fetch of a later round started while an earlier
    // round was still in flight
    struct BarrierWatcher {
        parallelism: usize,
        started: AtomicUsize,
        completed: AtomicUsize,
        violated: AtomicBool,
    }

    impl BarrierWatcher {
        fn new(parallelism: usize) -> Self {
            Self {
                parallelism,
                started: AtomicUsize::new(0),
                completed: AtomicUsize::new(0),
                violated: AtomicBool::new(false),
            }
        }
    }

    #[async_trait]
    impl YeenFetcher for BarrierWatcher {
        async fn fetch_one(&self) -> Result<Yeen, YeenError> {
            let index = self.started.fetch_add(1, Ordering::SeqCst);
            let round = index / self.parallelism;

            // If we belong to round N, every fetch of rounds 0..N must have
            // completed already - otherwise the barrier leaked
            if self.completed.load(Ordering::SeqCst) < round * self.parallelism {
                self.violated.store(true, Ordering::SeqCst);
            }

            // Stagger completion order inside the round
            let delay = (index % self.parallelism) as u64 * 5 + 1;
            tokio::time::sleep(Duration::from_millis(delay)).await;

            self.completed.fetch_add(1, Ordering::SeqCst);
            Ok(Yeen::from_url("https://stub/same.jpg".to_string()))
        }

        async fn download(&self, _yeen: &Yeen, _dir: &Path) -> Result<PathBuf, YeenError> {
            unreachable!("discovery tests never download")
        }
    }

    fn sorted_keys(result: &RunResult) -> Vec<String> {
        let mut keys: Vec<String> = result.yeens.iter().map(|y| y.key.clone()).collect();
        keys.sort();
        keys
    }

    #[tokio::test]
    async fn test_stops_on_second_duplicate_with_serial_rounds() {
        // Cycle A, B, A, C, A, B with one fetch per round and limit 2:
        // A (new), B (new), A (dup 1), C (new), A (dup 2) -> stop at fetch 5
        let fetcher = CycleFetcher::new(vec!["A", "B", "A", "C", "A", "B"]);

        let result = run_until_saturated(&fetcher, 1, 2)
            .await
            .expect("run should saturate cleanly");

        assert_eq!(fetcher.fetches(), 5);
        assert_eq!(sorted_keys(&result), vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_stops_at_first_round_boundary_past_the_limit() {
        // Two distinct photos, four fetches per round, limit 5:
        // round 1 yields 2 new + 2 dups, round 2 yields 4 dups (6 total >= 5)
        // - so the run must stop after exactly two full rounds
        let fetcher = CycleFetcher::new(vec!["A", "B"]);

        let result = run_until_saturated(&fetcher, 4, 5)
            .await
            .expect("run should saturate cleanly");

        assert_eq!(fetcher.fetches(), 8);
        assert_eq!(result.yeens.len(), 2);
    }

    #[tokio::test]
    async fn test_round_never_starts_before_previous_round_drains() {
        let fetcher = BarrierWatcher::new(4);

        // Every fetch is a duplicate after the first, so limit 9 forces
        // three full rounds: 3 dups, then 4 more (7), then 4 more (11)
        let result = run_until_saturated(&fetcher, 4, 9)
            .await
            .expect("run should saturate cleanly");

        assert!(
            !fetcher.violated.load(Ordering::SeqCst),
            "a fetch started before the previous round fully drained"
        );
        assert_eq!(fetcher.started.load(Ordering::SeqCst), 12);
        assert_eq!(result.yeens.len(), 1);
    }

    #[tokio::test]
    async fn test_one_failed_fetch_aborts_the_whole_run() {
        // Fetch #2 of the first round answers 500; everything else is fine.
        // The caller must get the error, never a partial collection.
        let fetcher = FailNthFetcher {
            fail_at: 2,
            cursor: AtomicUsize::new(0),
        };

        let err = run_until_saturated(&fetcher, 4, 100)
            .await
            .expect_err("a 500 inside a round must abort the run");

        match err {
            YeenError::Http { status, url } => {
                assert_eq!(status, 500);
                assert_eq!(url, "https://stub/broken");
            }
            other => panic!("expected an Http error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_single_round_saturation_still_finishes_the_round() {
        // All four fetches serve the same photo; limit 1 is crossed by the
        // second fetch, but the round runs to its barrier regardless
        let fetcher = CycleFetcher::new(vec!["only"]);

        let result = run_until_saturated(&fetcher, 4, 1)
            .await
            .expect("run should saturate cleanly");

        assert_eq!(fetcher.fetches(), 4);
        assert_eq!(result.yeens.len(), 1);
        assert_eq!(result.yeens[0].key, "only");
    }
}
