//! Link creation, listing, deletion, and resolution.

use std::sync::Arc;

use serde_json::json;
use url::Url;
use uuid::Uuid;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::{CodeInsert, LinkRepository};
use crate::error::AppError;
use crate::utils::code_generator::generate_code;

/// Maximum insert attempts before allocation gives up.
const MAX_ATTEMPTS: usize = 5;

/// Service for creating and resolving shortened URLs.
pub struct LinkService {
    links: Arc<dyn LinkRepository>,
    base_url: String,
}

impl LinkService {
    /// Creates a new link service.
    ///
    /// `base_url` is the public origin prepended to codes when building
    /// short URLs; a trailing slash is tolerated.
    pub fn new(links: Arc<dyn LinkRepository>, base_url: String) -> Self {
        Self { links, base_url }
    }

    /// Creates a short link for `target_url` owned by `user_id`.
    ///
    /// # Allocation
    ///
    /// Generates a random 6-character code and attempts one atomic
    /// insert. A collision on the short-code unique constraint triggers a
    /// fresh code and another attempt, up to [`MAX_ATTEMPTS`] times; each
    /// attempt is independent, so the loop is correct under any number of
    /// concurrent writers. Any other persistence failure aborts
    /// immediately.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `target_url` is not an
    /// absolute `http`/`https` URL, [`AppError::Exhausted`] when all
    /// attempts collide, and [`AppError::Internal`] on other database
    /// errors.
    pub async fn shorten(&self, target_url: &str, user_id: Uuid) -> Result<Link, AppError> {
        // Only http(s) targets may be stored; anything else would be
        // served back verbatim as a redirect location.
        match Url::parse(target_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => {
                return Err(AppError::bad_request(
                    "Invalid URL",
                    json!({ "url": target_url }),
                ));
            }
        }

        for _ in 0..MAX_ATTEMPTS {
            let code = generate_code();

            let outcome = self
                .links
                .create(NewLink {
                    code,
                    target_url: target_url.to_string(),
                    user_id,
                })
                .await?;

            match outcome {
                CodeInsert::Created(link) => return Ok(link),
                CodeInsert::CodeTaken => continue,
            }
        }

        // Either the code space is pathologically saturated or the store
        // is degraded; the caller should retry the whole operation later.
        Err(AppError::exhausted(
            "Could not allocate a unique short code",
            json!({ "attempts": MAX_ATTEMPTS }),
        ))
    }

    /// Lists all links owned by `user_id`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_links(&self, user_id: Uuid) -> Result<Vec<Link>, AppError> {
        self.links.list_by_user(user_id).await
    }

    /// Permanently deletes a link owned by the caller.
    ///
    /// A link that does not exist and a link owned by another user both
    /// report not-found, so callers cannot probe for other users' links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no owned link matched.
    pub async fn delete_link(&self, user_id: Uuid, link_id: Uuid) -> Result<(), AppError> {
        let deleted = self.links.delete_owned(link_id, user_id).await?;

        if !deleted {
            return Err(AppError::not_found(
                "URL not found or not authorized",
                json!({ "id": link_id }),
            ));
        }

        Ok(())
    }

    /// Resolves a short code to its target URL for redirection.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the code is empty and
    /// [`AppError::NotFound`] if no link has that code.
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        if code.is_empty() {
            return Err(AppError::bad_request(
                "Missing shortcode parameter",
                json!({}),
            ));
        }

        let link = self
            .links
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short URL not found", json!({ "code": code })))?;

        Ok(link.target_url)
    }

    /// Constructs the externally visible short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }
}
