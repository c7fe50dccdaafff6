//! API route tables.

use crate::api::handlers::{
    delete_url_handler, list_urls_handler, login_handler, register_handler, shorten_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

/// Public authentication routes, mounted under `/api/auth`.
///
/// - `POST /register` - Create a new account
/// - `POST /login`    - Exchange credentials for a session token
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
}

/// Link management routes, mounted under `/api/url`.
///
/// All of these require a Bearer session token via
/// [`crate::api::middleware::auth`].
///
/// - `POST   /shorten`    - Create a short link
/// - `GET    /urls`       - List the caller's links
/// - `DELETE /urls/{id}`  - Delete an owned link
pub fn url_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/urls", get(list_urls_handler))
        .route("/urls/{id}", delete(delete_url_handler))
}
