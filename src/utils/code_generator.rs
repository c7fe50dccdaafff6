//! Short code generation.
//!
//! Codes are fixed-length random strings over a URL-safe alphabet.
//! Uniqueness is not guaranteed here; the caller relies on the store's
//! unique constraint and retries on collision.

/// Length of a generated short code in characters.
pub const CODE_LENGTH: usize = 6;

/// URL-safe alphabet: 64 characters, so each random byte maps to one
/// character without modulo bias.
const ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Generates a cryptographically secure random short code.
///
/// Uses `getrandom` for entropy and maps each byte onto [`ALPHABET`],
/// producing exactly [`CODE_LENGTH`] characters.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_code() -> String {
    let mut buffer = [0u8; CODE_LENGTH];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    buffer
        .iter()
        .map(|&b| ALPHABET[(b & 0x3f) as usize] as char)
        .collect()
}
