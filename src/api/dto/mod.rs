//! Request and response DTOs for the REST API.

pub mod auth;
pub mod health;
pub mod links;
