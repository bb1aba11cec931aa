// src/saturation.rs
// =============================================================================
// This module implements the dedup tracker and the stopping rule.
//
// How it works:
// - Every fetched yeen is added under its dedup key
// - A key we have not seen before goes into the map
// - A key we HAVE seen bumps a duplicate counter instead
// - Once the counter reaches the configured limit, the pool is "saturated"
//   and add() starts returning true - that is the discovery loop's stop signal
//
// The counter is cumulative over the whole run. It never resets when a fresh
// key shows up later, and it never goes down. Crude, but it is exactly the
// rule this tool has always used: stop once you have wasted `limit` fetches
// on photos you already had.
//
// Concurrency:
// All workers in a round call add() at the same time, so the
// "check membership, then insert or count" step has to be atomic as a unit.
// Map and counter live behind ONE mutex; with separate locks (or a lock-free
// map plus an atomic counter) two workers discovering the same new key at the
// same moment could both be treated as "new" and skew the count.
//
// Rust concepts:
// - Mutex<T>: Only one thread can touch the guarded state at a time
// - Interior mutability: add() takes &self but still mutates (via the lock)
// =============================================================================

use std::collections::HashMap;
use std::sync::Mutex;

use crate::yeen::Yeen;

// Everything the lock guards: the discovered set plus the duplicate counter
struct TrackerState {
    discovered: HashMap<String, Yeen>,
    duplicate_hits: usize,
}

// Thread-safe accumulator for discovered yeens
//
// Construct one per run with the duplicate-hit limit (must be > 0), share it
// by reference across the round's workers, then consume it with into_yeens()
// once saturation is declared
pub struct SaturationTracker {
    limit: usize,
    state: Mutex<TrackerState>,
}

impl SaturationTracker {
    // Creates an empty tracker that saturates after `limit` duplicate hits
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            state: Mutex::new(TrackerState {
                discovered: HashMap::new(),
                duplicate_hits: 0,
            }),
        }
    }

    // Records one fetched yeen and reports whether we are saturated
    //
    // Returns true iff the duplicate counter is at or past the limit AFTER
    // this call. Note that once the limit is reached every later add returns
    // true too, even for a brand-new key - the counter only ever grows.
    pub fn add(&self, yeen: Yeen) -> bool {
        // The lock can only be poisoned if a worker panicked mid-add;
        // the run is lost at that point anyway, so we just propagate
        let mut state = self.state.lock().expect("tracker lock poisoned");

        if state.discovered.contains_key(&yeen.key) {
            // Seen this one before: count the wasted fetch, keep the
            // first-seen entry untouched
            state.duplicate_hits += 1;
        } else {
            state.discovered.insert(yeen.key.clone(), yeen);
        }

        state.duplicate_hits >= self.limit
    }

    /// Number of distinct yeens discovered so far
    pub fn unique_count(&self) -> usize {
        self.state.lock().expect("tracker lock poisoned").discovered.len()
    }

    /// Cumulative duplicate observations over the whole run
    pub fn duplicate_hits(&self) -> usize {
        self.state.lock().expect("tracker lock poisoned").duplicate_hits
    }

    /// Whether the duplicate-hit limit has been reached
    pub fn is_saturated(&self) -> bool {
        self.duplicate_hits() >= self.limit
    }

    // Consumes the tracker and hands back the final set
    //
    // Taking `self` by value is what freezes the set: once the yeens are out,
    // nothing can add to the map anymore
    pub fn into_yeens(self) -> Vec<Yeen> {
        self.state
            .into_inner()
            .expect("tracker lock poisoned")
            .discovered
            .into_values()
            .collect()
    }
}
