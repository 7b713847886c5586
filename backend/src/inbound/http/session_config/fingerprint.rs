//! Session key fingerprinting for operational visibility.
//!
//! A truncated SHA-256 digest of the cookie signing key lets operators check
//! which `SESSION_SECRET` a running instance derived its key from without
//! logging the key itself. The fingerprint is logged once at startup.

use actix_web::cookie::Key;
use sha2::{Digest, Sha256};

/// Length of the fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Generate a truncated SHA-256 fingerprint of the key's signing material.
///
/// Returns the first 8 bytes of the SHA-256 hash as a 16-character lowercase
/// hex string.
///
/// # Examples
///
/// ```rust
/// use actix_web::cookie::Key;
/// use recipe_backend::inbound::http::session_config::fingerprint::key_fingerprint;
///
/// let key = Key::generate();
/// let fp = key_fingerprint(&key);
///
/// assert_eq!(fp.len(), 16);
/// assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let signing_bytes = key.signing();
    let mut hasher = Sha256::new();
    hasher.update(signing_bytes);
    let result = hasher.finalize();
    hex::encode(&result[..FINGERPRINT_BYTES])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn key_from_secret(secret: &str) -> Key {
        Key::derive_from(secret.as_bytes())
    }

    #[rstest]
    fn same_secret_yields_same_fingerprint() {
        let secret = "s".repeat(super::super::SESSION_SECRET_MIN_LEN);
        assert_eq!(
            key_fingerprint(&key_from_secret(&secret)),
            key_fingerprint(&key_from_secret(&secret))
        );
    }

    #[rstest]
    fn fingerprint_is_short_lowercase_hex() {
        let fp = key_fingerprint(&Key::generate());

        assert_eq!(fp.len(), FINGERPRINT_BYTES * 2);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[rstest]
    #[case("a", "b")]
    #[case("secret-one", "secret-two")]
    fn different_secrets_yield_different_fingerprints(#[case] left: &str, #[case] right: &str) {
        let left = left.repeat(64);
        let right = right.repeat(64);
        assert_ne!(
            key_fingerprint(&key_from_secret(&left)),
            key_fingerprint(&key_from_secret(&right))
        );
    }
}
