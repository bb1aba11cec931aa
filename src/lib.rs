// src/lib.rs
// =============================================================================
// yeencopy - saturate a random-yeen endpoint and keep every distinct photo.
//
// The whole pipeline, in order:
// 1. fetch      - pull one "random yeen" page/image from the endpoint
// 2. identity   - turn what came back into a stable dedup key
// 3. saturation - the shared map + duplicate counter that decides "enough"
// 4. rounds     - barriered batches of parallel fetches until saturation
// 5. save       - land the final collection on disk
//
// The binary (src/main.rs) wires these together; everything here is usable
// as a library so the loop can be driven by stub fetchers in tests.
//
// Rust concepts:
// - Module tree: lib.rs declares the modules, each lives in its own file
// - Re-exports: `pub use` flattens the most-used types to the crate root
// =============================================================================

// Module declarations - tells Rust about our other source files
pub mod cli; // src/cli.rs - command-line parsing
pub mod error; // src/error.rs - the crate's error type
pub mod fetch; // src/fetch/ - HTTP client and page extraction
pub mod identity; // src/identity.rs - dedup key derivation
pub mod rounds; // src/rounds.rs - the discovery loop
pub mod saturation; // src/saturation.rs - dedup tracker and stop rule
pub mod save; // src/save.rs - persistence of the final collection
pub mod yeen; // src/yeen.rs - the resource value type

// Re-export the types almost every caller touches
pub use error::YeenError;
pub use yeen::Yeen;
