//! REST API request handlers.

pub mod auth;
pub mod health;
pub mod links;
pub mod redirect;

pub use auth::{login_handler, register_handler};
pub use health::health_handler;
pub use links::{delete_url_handler, list_urls_handler, shorten_handler};
pub use redirect::redirect_handler;
