// src/yeen.rs
// =============================================================================
// This module defines the core value type: a single discovered yeen.
//
// A Yeen is created once per successful fetch and never mutated afterwards.
// Its dedup key is derived at construction time, so a Yeen can never carry a
// key that disagrees with its contents.
//
// Two ways a Yeen comes into existence:
// - from_payload: we already hold the photo bytes (plus the server's declared
//   content type); the key is the MD5 of those bytes
// - from_url: we only know where the photo lives; the key is the URL itself
//   and the bytes stay on the server until download time
//
// Rust concepts:
// - Associated functions: Yeen::from_payload is a constructor, not a method
// - Ownership: constructors take ownership of the data they store
// =============================================================================

use crate::identity;

// One discovered photo, keyed for deduplication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Yeen {
    /// Dedup key: MD5 hex of the payload, or the source URL (see constructors)
    pub key: String,
    /// The server's declared content type, e.g. "image/jpeg"
    /// (empty when the bytes have not been fetched yet)
    pub content_type: String,
    /// Raw photo bytes (empty in the URL flavor until download time)
    pub payload: Vec<u8>,
}

impl Yeen {
    // Builds a yeen from bytes we already hold
    //
    // The key is the content hash, so two byte-identical photos served under
    // different names still count as one yeen
    pub fn from_payload(payload: Vec<u8>, content_type: String) -> Self {
        let key = identity::content_key(&payload);
        Self {
            key,
            content_type,
            payload,
        }
    }

    // Builds a yeen from a discovered photo URL
    //
    // The URL doubles as the dedup key; the payload is fetched later, during
    // the download phase (one extra round-trip per yeen)
    pub fn from_url(url: String) -> Self {
        let key = identity::url_key(&url);
        Self {
            key,
            content_type: String::new(),
            payload: Vec::new(),
        }
    }

    /// The photo's URL in the URL flavor (where the key is the locator)
    pub fn url(&self) -> &str {
        &self.key
    }
}
