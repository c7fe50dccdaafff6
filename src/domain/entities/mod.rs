//! Core business entities.

pub mod link;
pub mod user;

pub use link::{Link, NewLink};
pub use user::{NewUser, SafeUser, User};
