// src/identity.rs
// =============================================================================
// This module derives deduplication keys for fetched resources.
//
// Two flavors of identity:
// - content_key: MD5 digest of the raw bytes, rendered as lowercase hex.
//   Used when the endpoint hands us the photo bytes directly.
// - url_key: the discovered photo URL, used verbatim. Used when the endpoint
//   hands us a page and we scrape the photo's location out of it.
//
// Why MD5? We only need fast, non-adversarial uniqueness to tell photos
// apart - nobody is trying to forge collisions against us. Do NOT reuse this
// choice anywhere security matters.
//
// Both functions are pure and deterministic: identical input bytes always
// produce identical keys, which is what makes dedup by key correct.
//
// Rust concepts:
// - The Digest trait: All RustCrypto hashers share new()/update()/finalize()
// - &[u8] vs &str: Keys are derived from raw bytes, not text
// =============================================================================

use md5::{Digest, Md5};

// Derives a content-identity key: MD5 over the raw payload bytes
//
// Parameters:
//   payload: the resource's raw bytes
//
// Returns: 32-character lowercase hex string (128-bit digest)
//
// Example:
//   content_key(b"abc") -> "900150983cd24fb0d6963f7d28e17f72"
pub fn content_key(payload: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(payload);
    hex::encode(hasher.finalize())
}

// Derives a URL-identity key: the discovered locator, verbatim
//
// No normalization happens here on purpose. The endpoint serves each photo
// under exactly one path, so the raw string is already a stable identity -
// and any rewriting would change which fetches count as duplicates.
pub fn url_key(locator: &str) -> String {
    locator.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_key_known_digests() {
        // Reference vectors from RFC 1321
        assert_eq!(content_key(b""), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(content_key(b"a"), "0cc175b9c0f1b6a831c399e269772661");
        assert_eq!(content_key(b"abc"), "900150983cd24fb0d6963f7d28e17f72");
    }

    #[test]
    fn test_content_key_is_deterministic() {
        let payload = vec![0xde, 0xad, 0xbe, 0xef];
        assert_eq!(content_key(&payload), content_key(&payload.clone()));
    }

    #[test]
    fn test_content_key_is_lowercase_hex() {
        let key = content_key(b"yeen");
        assert_eq!(key.len(), 32);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_distinct_payloads_get_distinct_keys() {
        assert_ne!(content_key(b"yeen one"), content_key(b"yeen two"));
    }

    #[test]
    fn test_url_key_is_verbatim() {
        let locator = "https://hyena.photos/images/a%20yeen.jpg";
        assert_eq!(url_key(locator), locator);
    }
}
