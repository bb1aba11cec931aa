// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap (just the endpoint)
// 2. Discovery: rounds of parallel fetches until duplicates saturate
// 3. Download: pull every distinct yeen into the output directory
// 4. Exit with proper code (0 = collection saved, 1 = the run failed)
//
// Rust concepts used:
// - async/await: Because we make many network requests concurrently
// - Result<T, E>: For error handling (T = success type, E = error type)
// - The ? operator: propagate any failure straight out of run()
// =============================================================================

use std::path::Path;
use std::time::Instant;

// anyhow::Result is like std::result::Result but simpler for applications
// It lets us return any error type with the ? operator
use anyhow::Result;
use clap::Parser; // Parser trait enables the parse() method

use yeencopy::cli::Cli;
use yeencopy::fetch::YeenClient;
use yeencopy::rounds::{self, DEFAULT_PARALLELISM, DEFAULT_SATURATION_LIMIT};
use yeencopy::save;

// Every run drops its collection into this directory, relative to the cwd
const OUTPUT_DIR: &str = "yeens";

// The #[tokio::main] attribute transforms our async main into a real main function
// It creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    // Run our application logic and capture the exit code
    // std::process::exit() terminates the program with the given code
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // A failed fetch aborts the whole run; print it and exit non-zero
            eprintln!("Error: {}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = collection discovered and saved
//   Err = any fetch failure during discovery, or a save-phase setup failure
async fn run() -> Result<i32> {
    // Parse command-line arguments into our Cli struct
    // This will automatically handle --help, --version, etc.
    let cli = Cli::parse();

    let client = YeenClient::new(cli.endpoint);

    // Phase 1: discover until saturation (fail-fast - one bad fetch ends it)
    let result =
        rounds::run_until_saturated(&client, DEFAULT_PARALLELISM, DEFAULT_SATURATION_LIMIT)
            .await?;
    println!(
        "Discovered {} yeens in {} seconds",
        result.yeens.len(),
        result.elapsed.as_millis() as f64 / 1000.0
    );

    // Phase 2: download the collection (best-effort - failures are logged,
    // the rest of the batch keeps going)
    let download_started = Instant::now();
    let saved = save::download_all(
        &client,
        &result.yeens,
        Path::new(OUTPUT_DIR),
        DEFAULT_PARALLELISM,
    )
    .await?;
    println!(
        "Downloaded {} yeens in {} seconds",
        saved,
        download_started.elapsed().as_millis() as f64 / 1000.0
    );

    Ok(0)
}
