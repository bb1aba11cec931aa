// src/save.rs
// =============================================================================
// Persistence for a finished discovery run. Two ways to land yeens on disk:
//
// - write_all: the yeens were fetched whole during discovery, so their bytes
//   are already in memory. Write each one as <key>.<extension> and fail fast
//   on the first error - nothing here is worth a half-written collection.
// - download_all: discovery only collected locators, so each yeen costs one
//   more HTTP round-trip at save time. Downloads run through a bounded pool
//   and are best-effort: a failed item is logged and skipped, its siblings
//   keep going.
//
// The split failure policy is deliberate. During discovery an error means the
// collection itself is unreliable, so the run aborts. During the save phase
// the collection is already final - losing one file is an inconvenience, not
// a reason to throw away the rest.
//
// Rust concepts:
// - tokio::fs: async filesystem calls that don't block the runtime
// - buffer_unordered: a stream combinator acting as a bounded worker pool
// - match on &str: a fixed lookup table with no allocation
// =============================================================================

use std::path::Path;

use futures::stream::{self, StreamExt};
use url::Url;

use crate::error::YeenError;
use crate::fetch::YeenFetcher;
use crate::yeen::Yeen;

// Maps a declared content type to the file extension we save under
//
// Parameters:
//   content_type: the Content-Type header value, verbatim
//
// Returns: a known image extension, or "unk" for anything unrecognized
pub fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        _ => "unk",
    }
}

// Derives the on-disk file name from a yeen's locator URL
//
// Takes the last segment of the URL path and swaps any literal "%20" for an
// underscore so the names are pleasant in a shell.
//
// Example: "https://hyena.photos/i/spotted%20yeen.jpg" -> "spotted_yeen.jpg"
pub fn file_name_for(locator: &str) -> String {
    let last_segment = Url::parse(locator)
        .ok()
        .and_then(|parsed| {
            parsed
                .path_segments()
                .and_then(|segments| segments.last().map(str::to_string))
        })
        .unwrap_or_default();

    last_segment.replace("%20", "_")
}

// Writes every yeen's in-memory payload into the target directory
//
// Creates the directory (and parents) if missing. File names are
// <key>.<extension>, so a re-run of the same collection overwrites cleanly.
//
// Parameters:
//   yeens: the frozen post-saturation collection
//   dir: where the files go
//
// Returns: how many files were written, or the first write error (fail-fast)
pub async fn write_all(yeens: &[Yeen], dir: &Path) -> Result<usize, YeenError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| YeenError::Save {
            path: dir.to_path_buf(),
            source,
        })?;

    for yeen in yeens {
        let path = dir.join(format!(
            "{}.{}",
            yeen.key,
            extension_for(&yeen.content_type)
        ));
        tokio::fs::write(&path, &yeen.payload)
            .await
            .map_err(|source| YeenError::Save {
                path: path.clone(),
                source,
            })?;
    }

    Ok(yeens.len())
}

// Downloads every yeen's bytes from its locator into the target directory
//
// Runs at most `parallelism` downloads at once. Individual failures are
// logged to stderr and skipped - the rest of the batch is unaffected.
//
// Distinct locators sharing a trailing path segment land on the same
// destination file; whichever download finishes last owns the bytes.
//
// Parameters:
//   fetcher: performs the actual per-yeen download
//   yeens: the frozen post-saturation collection (URL-keyed)
//   dir: where the files go
//   parallelism: concurrent download cap
//
// Returns: how many yeens actually made it to disk
pub async fn download_all<F>(
    fetcher: &F,
    yeens: &[Yeen],
    dir: &Path,
    parallelism: usize,
) -> Result<usize, YeenError>
where
    F: YeenFetcher + ?Sized,
{
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| YeenError::Save {
            path: dir.to_path_buf(),
            source,
        })?;

    let outcomes = stream::iter(yeens)
        .map(|yeen| async move {
            match fetcher.download(yeen, dir).await {
                Ok(_path) => true,
                Err(err) => {
                    eprintln!("  ⚠️  Failed to save {}: {}", yeen.url(), err);
                    false
                }
            }
        })
        .buffer_unordered(parallelism)
        .collect::<Vec<bool>>()
        .await;

    Ok(outcomes.into_iter().filter(|saved| *saved).count())
}
