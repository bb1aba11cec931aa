// src/fetch/mod.rs
// =============================================================================
// This module contains everything that touches the network.
//
// Submodules:
// - client: the YeenFetcher trait, plus the real reqwest-backed YeenClient
// - extract: the literal src="..." scrape that finds the photo URL in a page
//
// This file (mod.rs) is the module root - it re-exports the public API so
// callers can write `fetch::YeenClient` instead of `fetch::client::YeenClient`.
// =============================================================================

mod client;
mod extract;

// Re-export public items from submodules
pub use client::{YeenClient, YeenFetcher, USER_AGENT};
pub use extract::extract_src;
