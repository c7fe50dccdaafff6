//! DTOs for link management and shortening endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::entities::Link;

/// Request body for `POST /api/url/shorten`.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[validate(url(message = "Invalid URL"))]
    pub url: String,
}

/// JSON projection of a stored link.
#[derive(Debug, Serialize)]
pub struct LinkDto {
    pub id: Uuid,
    pub code: String,
    pub target_url: String,
    pub created_at: DateTime<Utc>,
}

impl From<Link> for LinkDto {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            code: link.code,
            target_url: link.target_url,
            created_at: link.created_at,
        }
    }
}

/// Response body for a successful shorten.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub message: String,
    pub short_url: String,
    pub link: LinkDto,
}

/// Response body for the link listing.
#[derive(Debug, Serialize)]
pub struct UrlListResponse {
    pub urls: Vec<LinkDto>,
}

/// Response body for a successful delete.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorten_request_requires_valid_url() {
        let ok = ShortenRequest {
            url: "https://example.com/path?q=1".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad = ShortenRequest {
            url: "example dot com".to_string(),
        };
        assert!(bad.validate().is_err());
    }
}
