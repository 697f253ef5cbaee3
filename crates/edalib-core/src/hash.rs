//! SHA-256 digests of archive members.

use sha2::Digest;
use sha2::Sha256;

/// Computes the lowercase hex SHA-256 digest of `data`.
///
/// # Examples
///
/// ```
/// use edalib_core::sha256_hex;
///
/// assert_eq!(
///     sha256_hex(b"hello world"),
///     "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
/// );
/// ```
#[must_use]
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

/// Returns `true` if two hex digests are equal, ignoring ASCII case.
#[must_use]
pub fn digest_matches(actual: &str, expected: &str) -> bool {
    actual.eq_ignore_ascii_case(expected)
}

/// Returns `true` if `digest` looks like a hex-encoded SHA-256 value.
#[must_use]
pub fn is_sha256_hex(digest: &str) -> bool {
    digest.len() == 64 && digest.bytes().all(|b| b.is_ascii_hexdigit())
}
