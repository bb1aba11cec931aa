// src/fetch/client.rs
// =============================================================================
// This module talks to the photo server.
//
// Key functionality:
// - One shared reqwest::Client that stamps every request with our fixed
//   User-Agent header
// - get_checked(): a GET that accepts status 200 and nothing else
// - fetch_random_page(): the discovery request - the endpoint serves a page
//   with a random photo in it, and we scrape out that photo's URL
// - fetch_random_image(): the direct flavor - the endpoint serves the photo
//   bytes themselves, and we key them by content hash
// - download_yeen(): the second round-trip that lands a discovered photo on
//   disk during the download phase
//
// The YeenFetcher trait is the seam between the discovery loop and the
// network: production code drives it with this client, tests drive it with
// stub fetchers that never touch a socket.
//
// Rust concepts:
// - async/await: Many fetches in flight at once on one runtime
// - Traits: YeenFetcher is the interface; YeenClient is one implementation
// - #[async_trait]: Lets trait methods be async (not native until late Rust)
// =============================================================================

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::error::YeenError;
use crate::fetch::extract::extract_src;
use crate::save::file_name_for;
use crate::yeen::Yeen;

/// The fixed identifying header sent with every request
///
/// The photo server knows this tool by this exact string - keep it stable
pub const USER_AGENT: &str = "GayPizza-YeenCopy/1.0";

// The seam between the discovery/download machinery and the network
//
// fetch_one() produces one randomly-served yeen; download() lands one
// discovered yeen in the output directory and returns the written path
#[async_trait]
pub trait YeenFetcher: Send + Sync {
    /// Fetches one randomly-served yeen from the fixed endpoint
    async fn fetch_one(&self) -> Result<Yeen, YeenError>;

    /// Fetches a discovered yeen's bytes and writes them under `dir`
    async fn download(&self, yeen: &Yeen, dir: &Path) -> Result<PathBuf, YeenError>;
}

// HTTP client bound to one discovery endpoint
pub struct YeenClient {
    http: Client,
    base_url: String,
}

impl YeenClient {
    // Creates a client for the given discovery endpoint
    //
    // Note: no request timeout is configured. A hung call stalls its round
    // for the rest of the run - that is this tool's long-standing behavior,
    // and the round barrier makes it visible rather than dangerous.
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// The discovery endpoint this client was built for
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // Performs one GET and insists on status 200
    //
    // Anything else - including 2xx cousins like 204 - is a failed call.
    // Network-level failures (DNS, connect, TLS) surface as Request errors.
    async fn get_checked(&self, url: &str) -> Result<reqwest::Response, YeenError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| YeenError::Request {
                url: url.to_string(),
                source,
            })?;

        if response.status() != StatusCode::OK {
            return Err(YeenError::Http {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(response)
    }

    // Discovery request, page flavor: scrape the photo URL out of the body
    //
    // The endpoint serves a fresh random photo page on every hit. The value
    // of its first src="..." attribute, concatenated onto the base endpoint
    // (plain string concatenation - the site serves root-relative paths),
    // becomes the yeen's locator AND its dedup key.
    pub async fn fetch_random_page(&self) -> Result<Yeen, YeenError> {
        let response = self.get_checked(&self.base_url).await?;

        let body = response.text().await.map_err(|source| YeenError::Request {
            url: self.base_url.clone(),
            source,
        })?;

        let src = extract_src(&body).ok_or_else(|| YeenError::NoImage {
            url: self.base_url.clone(),
        })?;

        Ok(Yeen::from_url(format!("{}{}", self.base_url, src)))
    }

    // Discovery request, direct flavor: the endpoint serves the bytes itself
    //
    // The declared Content-Type rides along so the writer can pick a file
    // extension later; a missing header just means an empty content type
    pub async fn fetch_random_image(&self) -> Result<Yeen, YeenError> {
        let response = self.get_checked(&self.base_url).await?;

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let bytes = response
            .bytes()
            .await
            .map_err(|source| YeenError::Request {
                url: self.base_url.clone(),
                source,
            })?;

        Ok(Yeen::from_payload(bytes.to_vec(), content_type))
    }

    // Fetches a discovered yeen's bytes and writes them into `dir`
    //
    // This is the second network round-trip per photo: discovery only learned
    // the URL, the payload stays on the server until now
    pub async fn download_yeen(&self, yeen: &Yeen, dir: &Path) -> Result<PathBuf, YeenError> {
        let url = yeen.url();
        let response = self.get_checked(url).await?;

        let bytes = response
            .bytes()
            .await
            .map_err(|source| YeenError::Request {
                url: url.to_string(),
                source,
            })?;

        let path = dir.join(file_name_for(url));
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|source| YeenError::Save {
                path: path.clone(),
                source,
            })?;

        Ok(path)
    }
}

#[async_trait]
impl YeenFetcher for YeenClient {
    async fn fetch_one(&self) -> Result<Yeen, YeenError> {
        self.fetch_random_page().await
    }

    async fn download(&self, yeen: &Yeen, dir: &Path) -> Result<PathBuf, YeenError> {
        self.download_yeen(yeen, dir).await
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why one shared Client?
//    - reqwest::Client keeps a connection pool internally
//    - Sixteen parallel fetches against one host reuse a handful of
//      connections instead of opening sixteen
//    - Client is cheap to pass by reference; it's an Arc inside
//
// 2. What does #[async_trait] do?
//    - Stable Rust couldn't put `async fn` in traits when this crate's
//      toolchain baseline was set
//    - The macro rewrites each method to return Pin<Box<dyn Future>>
//    - Callers just .await as if it were a plain async fn
//
// 3. Why does get_checked reject 204 or 301?
//    - The photo server answers 200 for every good request
//    - Anything else means we are talking to the wrong thing, so the run
//      stops loudly instead of collecting garbage
//
// 4. Why map_err instead of ?
//    - reqwest::Error alone doesn't tell the user WHICH url failed
//    - Wrapping it into YeenError::Request attaches the target to the
//      diagnostic before it bubbles up
// -----------------------------------------------------------------------------
