//! Helpers for classifying sqlx database errors by constraint.

/// Returns the constraint name if the error is a unique violation.
pub fn unique_violation_constraint(e: &sqlx::Error) -> Option<&str> {
    let db_err = e.as_database_error()?;

    if !db_err.is_unique_violation() {
        return None;
    }

    db_err.constraint()
}

/// True if the error is a unique violation on the short-code constraint.
///
/// The allocation retry loop treats exactly this case as "try another
/// code"; every other database error fails fast.
pub fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    matches!(unique_violation_constraint(e), Some("links_code_key"))
}

/// True if the error is a unique violation on a user identity constraint
/// (email or phone).
pub fn is_unique_violation_on_user(e: &sqlx::Error) -> bool {
    matches!(
        unique_violation_constraint(e),
        Some("users_email_key") | Some("users_phone_key")
    )
}
