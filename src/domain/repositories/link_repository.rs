//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Outcome of an atomic link insert.
///
/// `CodeTaken` is the distinguishable conflict signal the allocation
/// retry loop needs: a unique violation on the short-code constraint is
/// reported here rather than as an error, while every other persistence
/// failure still surfaces as [`AppError`] and aborts the loop.
#[derive(Debug, Clone)]
pub enum CodeInsert {
    Created(Link),
    CodeTaken,
}

/// Repository interface for managing short links.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Attempts to insert a new link in one atomic statement.
    ///
    /// Uniqueness of the short code is enforced by the store's constraint
    /// check at insert time, not by any application-level lock, so this
    /// stays correct under arbitrary concurrent writers.
    ///
    /// # Returns
    ///
    /// - `Ok(CodeInsert::Created(link))` on success
    /// - `Ok(CodeInsert::CodeTaken)` if the code is already in use
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on any other database error.
    async fn create(&self, new_link: NewLink) -> Result<CodeInsert, AppError>;

    /// Finds a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Lists all links owned by a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Link>, AppError>;

    /// Deletes a link if and only if it is owned by `user_id`.
    ///
    /// Returns `Ok(true)` if a row was removed, `Ok(false)` if no link
    /// matched the id and owner. A missing link and a link owned by
    /// someone else are indistinguishable to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete_owned(&self, id: Uuid, user_id: Uuid) -> Result<bool, AppError>;
}
