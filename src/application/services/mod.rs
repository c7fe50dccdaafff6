//! Business logic services.

pub mod auth_service;
pub mod link_service;

pub use auth_service::{AuthService, AuthUser, RegisterInput};
pub use link_service::LinkService;
