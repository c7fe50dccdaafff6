//! Password hashing with argon2.
//!
//! The salt is generated per hash and embedded in the PHC string, so no
//! separate salt storage is needed. Plaintext passwords never leave this
//! module's call stack and are never logged.

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use serde_json::json;

use crate::error::AppError;

/// Derives a salted argon2id hash in PHC string format.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            tracing::error!(error = %e, "Password hashing failed");
            AppError::internal("Internal server error", json!({}))
        })
}

/// Verifies a plaintext password against a stored PHC hash.
///
/// Returns `false` both for a non-matching password and for a hash that
/// fails to parse; the caller treats either as invalid credentials.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("Ab1!abcd").unwrap();

        assert_ne!(hash, "Ab1!abcd");
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("Ab1!abcd", &hash));
    }

    #[test]
    fn test_wrong_password_rejected() {
        let hash = hash_password("Ab1!abcd").unwrap();
        assert!(!verify_password("Ab1!abce", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let h1 = hash_password("Ab1!abcd").unwrap();
        let h2 = hash_password("Ab1!abcd").unwrap();
        assert_ne!(h1, h2);
    }

    #[test]
    fn test_garbage_hash_rejected() {
        assert!(!verify_password("Ab1!abcd", "not-a-phc-string"));
    }
}
