// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// yeencopy has about the smallest CLI a tool can have: one optional
// positional argument that overrides the discovery endpoint. No flags, no
// subcommands. clap's derive API still earns its keep - it gives us --help
// and --version for free.
//
// Rust concepts:
// - Derive macros: #[derive(Parser)] generates all the parsing code
// - Constants: the default endpoint lives in one place
// =============================================================================

use clap::Parser;

/// Where yeens come from when the user doesn't say otherwise
pub const DEFAULT_ENDPOINT: &str = "https://hyena.photos";

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "yeencopy",
    version = "0.1.0",
    about = "Collects every distinct yeen a random-photo endpoint will serve",
    long_about = "yeencopy hits a random-yeen endpoint over and over, deduplicates what comes \
                  back, stops once repeats pile up past a saturation limit, and downloads the \
                  whole distinct collection to a local directory."
)]
pub struct Cli {
    /// Discovery endpoint serving a random yeen page per request
    ///
    /// This is a positional argument (optional, no flag needed)
    #[arg(default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why is the endpoint positional instead of a flag?
//    - `yeencopy https://other.example` reads naturally for a one-argument tool
//    - default_value makes bare `yeencopy` work out of the box
//
// 2. Why String instead of &str?
//    - String is owned (the struct owns the data)
//    - CLI arguments outlive the parsing call, so the struct must own them
//
// 3. Where did the parallelism and limit flags go?
//    - There are none on purpose: the tool tunes itself with built-in
//      defaults (see src/rounds.rs), keeping the surface to one argument
// -----------------------------------------------------------------------------
