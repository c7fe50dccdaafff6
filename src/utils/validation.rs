//! Input shape rules shared by the request DTOs.
//!
//! The regexes mirror the account rules enforced at registration time:
//! basic email shape, ten-digit phone numbers, and a password policy of
//! at least 8 characters with upper, lower, digit, and one symbol from
//! a fixed set.

use regex::Regex;
use std::sync::LazyLock;
use validator::ValidationError;

/// Basic email structure: local part, `@`, domain with a dot.
pub static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Exactly 10 digits.
pub static PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{10}$").unwrap());

/// Symbols accepted by the password policy.
const PASSWORD_SYMBOLS: &[char] = &['@', '$', '!', '%', '*', '?', '&'];

/// Validates password strength for registration.
///
/// Requires at least 8 characters including an uppercase letter, a
/// lowercase letter, a digit, and one of `@$!%*?&`.
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let long_enough = password.chars().count() >= 8;
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| PASSWORD_SYMBOLS.contains(&c));

    if long_enough && has_upper && has_lower && has_digit && has_symbol {
        Ok(())
    } else {
        let mut err = ValidationError::new("password_strength");
        err.message = Some(
            "Password must be 8+ chars, include uppercase, lowercase, number & special char"
                .into(),
        );
        Err(err)
    }
}
