//! Password hashing and verification.
//!
//! Passwords are hashed with Argon2id using per-hash random salts and stored
//! as opaque PHC strings. Verification never reveals why it failed: a
//! malformed stored hash and a wrong password both read as "no match".
//!
//! # Invariants
//! - Hashing the same password twice yields different strings (random salt).
//! - `verify_password` has no side effects and never panics.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

/// Error returned when a password cannot be hashed.
#[derive(Debug)]
pub struct HashError(argon2::password_hash::Error);

impl std::fmt::Display for HashError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to hash password: {}", self.0)
    }
}

impl std::error::Error for HashError {}

/// Hash a raw password with a freshly generated salt.
///
/// # Errors
/// Returns an error if hashing fails (e.g. the platform RNG is unavailable).
pub fn hash_password(raw: &str) -> Result<String, HashError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(raw.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(HashError)
}

/// Verify a raw password against a stored PHC-string hash.
///
/// Returns `false` for a non-matching password and for a stored hash that
/// cannot be parsed. Collapsing the two keeps the login failure path
/// uniform.
#[must_use]
pub fn verify_password(raw: &str, stored_hash: &str) -> bool {
    PasswordHash::new(stored_hash).is_ok_and(|parsed| {
        Argon2::default()
            .verify_password(raw.as_bytes(), &parsed)
            .is_ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify_roundtrip() {
        let hash = hash_password("secret").expect("hashing must succeed");
        assert!(verify_password("secret", &hash));
    }

    #[test]
    fn test_wrong_password_does_not_verify() {
        let hash = hash_password("secret").expect("hashing must succeed");
        assert!(!verify_password("not-secret", &hash));
    }

    #[test]
    fn test_malformed_stored_hash_does_not_verify() {
        assert!(!verify_password("secret", "not-a-phc-string"));
        assert!(!verify_password("secret", ""));
    }

    #[test]
    fn test_salts_are_random() {
        let first = hash_password("secret").expect("hashing must succeed");
        let second = hash_password("secret").expect("hashing must succeed");
        assert_ne!(first, second);
        assert!(verify_password("secret", &first));
        assert!(verify_password("secret", &second));
    }
}
