//! Handlers for link management endpoints (shorten, list, delete).

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::links::{
    DeleteResponse, LinkDto, ShortenRequest, ShortenResponse, UrlListResponse,
};
use crate::application::services::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for the authenticated caller.
///
/// # Endpoint
///
/// `POST /api/url/shorten`
///
/// # Errors
///
/// Returns 400 for a malformed URL, 401 without a valid session token,
/// and 500 (`allocation_exhausted`) if no unique code could be
/// allocated.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    payload.validate()?;

    let link = state.link_service.shorten(&payload.url, user.id).await?;
    let short_url = state.link_service.short_url(&link.code);

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            message: "Short URL created successfully".to_string(),
            short_url,
            link: LinkDto::from(link),
        }),
    ))
}

/// Lists the caller's links, newest first.
///
/// # Endpoint
///
/// `GET /api/url/urls`
pub async fn list_urls_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UrlListResponse>, AppError> {
    let links = state.link_service.list_links(user.id).await?;

    Ok(Json(UrlListResponse {
        urls: links.into_iter().map(LinkDto::from).collect(),
    }))
}

/// Deletes a link owned by the caller.
///
/// # Endpoint
///
/// `DELETE /api/url/urls/{id}`
///
/// # Errors
///
/// Returns 400 for a malformed id and 404 when the link does not exist
/// or belongs to another user; the two cases are indistinguishable.
pub async fn delete_url_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    let link_id = Uuid::parse_str(&id)
        .map_err(|_| AppError::bad_request("Invalid URL id", json!({ "id": id })))?;

    state.link_service.delete_link(user.id, link_id).await?;

    Ok(Json(DeleteResponse {
        message: "URL deleted successfully".to_string(),
    }))
}
