//! Session token generation and at-rest hashing.
//!
//! A session token is an opaque secret handed to the client exactly once.
//! The store only ever sees its SHA-256 hash, so a database dump does not
//! leak usable credentials. Issuing a new token for a user overwrites the
//! stored hash, which invalidates the previous session immediately.

use sha2::{Digest, Sha256};

/// Generate a random session token using a cryptographically secure RNG.
///
/// 32 random bytes, base64url-encoded without padding: URL- and header-safe,
/// and well past the 128 bits of entropy a session credential needs.
pub fn generate_token() -> String {
    use base64::Engine;
    use rand::RngCore;
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// Hash a token for storage and lookup.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    let result = hasher.finalize();
    result.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_tokens_are_unique_and_header_safe() {
        let a = generate_token();
        let b = generate_token();
        assert_ne!(a, b);
        // 32 bytes -> 43 base64url characters without padding.
        assert_eq!(a.len(), 43);
        assert!(
            a.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn hash_is_stable_lowercase_hex() {
        let hash = hash_token("secret");
        assert_eq!(hash, hash_token("secret"));
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_ne!(hash, hash_token("Secret"));
    }
}
