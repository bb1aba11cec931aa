// src/fetch/extract.rs
// =============================================================================
// This module pulls the photo URL out of the discovery page.
//
// The endpoint serves a tiny HTML page with one <img> tag in it. We do NOT
// run a real HTML parser over it. The extraction contract is, literally:
//
//   1. Split the body on the literal substring `src="`
//   2. Take the second segment
//   3. Split that on `"` and take the first segment
//   4. Trim whitespace
//
// Yes, this is brittle - a src= anywhere in the page wins, quoting styles
// other than double quotes are invisible, and there is no entity decoding.
// It has to stay byte-for-byte like this: the extracted string becomes the
// yeen's identity key, so any "smarter" extraction would change which fetches
// count as duplicates.
//
// Rust concepts:
// - str::split returns lazy segments; nth(1) is the piece after the first
//   delimiter occurrence
// - Returning Option<&str> borrows from the input - no allocation here
// =============================================================================

// Extracts the value of the first src="..." attribute in the body
//
// Parameters:
//   body: the fetched page, as text
//
// Returns: Some(trimmed value) or None if the pattern is absent
//
// Example:
//   extract_src(r#"<img src="/images/yeen.jpg">"#) -> Some("/images/yeen.jpg")
pub fn extract_src(body: &str) -> Option<&str> {
    let after_marker = body.split("src=\"").nth(1)?;

    // The value ends at the next quote; with no closing quote the whole
    // remainder of the body is the value
    let value = match after_marker.split_once('"') {
        Some((value, _rest)) => value,
        None => after_marker,
    };

    Some(value.trim())
}
