// src/error.rs
// =============================================================================
// This module defines the error type for the whole tool.
//
// We keep one enum with a variant per failure class:
// - Http: the server answered with something other than 200 OK
// - Request: the request itself failed (DNS, connect, timeout, TLS, ...)
// - NoImage: a page came back without the src="..." pattern we scrape for
// - Save: a downloaded file could not be written to disk
//
// The first three are fatal during discovery - one bad response kills the
// whole run. Save errors are only fatal when writing from memory; during the
// parallel download phase they are caught per item and logged instead.
//
// Rust concepts:
// - thiserror: Derive macro that implements std::error::Error + Display
// - #[source]: Wires up error chaining so anyhow can print causes
// =============================================================================

use std::io;
use std::path::PathBuf;
use thiserror::Error;

// Everything that can go wrong while copying yeens
//
// #[derive(Error)] generates the std::error::Error impl for us, and the
// #[error("...")] attributes become the Display messages
#[derive(Debug, Error)]
pub enum YeenError {
    /// The server responded, but not with 200 OK
    ///
    /// Anything other than a plain 200 is treated as a failed call - there is
    /// no retry and no redirect chasing in this tool
    #[error("HTTP call failed to {url}: status={status}")]
    Http { url: String, status: u16 },

    /// The request never produced a response (network-level failure)
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The fetched page had no src="..." attribute to extract
    ///
    /// The discovery endpoint serves a tiny HTML page containing one <img>
    /// tag; if that pattern is missing we cannot learn the photo's URL
    #[error("no src=\" attribute found in page from {url}")]
    NoImage { url: String },

    /// A file could not be written to the output directory
    #[error("failed to save {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
