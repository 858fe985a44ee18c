//! Content fingerprinting for templates.
//!
//! Produces a stable 32-hex-char MD5 digest of a template's bytes, after
//! normalizing line endings so editor/OS differences never cause a spurious
//! "changed" event. MD5 is chosen for speed and historical-ledger stability;
//! this is not a security boundary.

use md5::{Digest, Md5};

/// Computes the content fingerprint of a template's raw bytes.
///
/// `CRLF` sequences are normalized to `LF` before hashing.
pub fn hash(bytes: &[u8]) -> String {
    let normalized = normalize_line_endings(bytes);
    let mut hasher = Md5::new();
    hasher.update(&normalized);
    format!("{:x}", hasher.finalize())
}

/// Convenience wrapper over [`hash`] for UTF-8 text.
pub fn hash_str(s: &str) -> String {
    hash(s.as_bytes())
}

fn normalize_line_endings(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\r' && bytes.get(i + 1) == Some(&b'\n') {
            out.push(b'\n');
            i += 2;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic() {
        let s = "create or replace function f() returns void as $$ select 1; $$ language sql;";
        assert_eq!(hash_str(s), hash_str(s));
    }

    #[test]
    fn hash_is_crlf_invariant() {
        let lf = "line one\nline two\n";
        let crlf = "line one\r\nline two\r\n";
        assert_eq!(hash_str(lf), hash_str(crlf));
    }

    #[test]
    fn hash_differs_on_content_change() {
        assert_ne!(hash_str("select 1;"), hash_str("select 2;"));
    }

    #[test]
    fn hash_is_32_hex_chars() {
        let h = hash_str("select 1;");
        assert_eq!(h.len(), 32);
        assert!(h.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn mixed_line_endings_normalize_consistently() {
        let mixed = "a\r\nb\nc\r\n";
        let all_lf = "a\nb\nc\n";
        assert_eq!(hash_str(mixed), hash_str(all_lf));
    }
}
