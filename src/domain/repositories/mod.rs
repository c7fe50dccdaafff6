//! Repository traits abstracting the persistence layer.

pub mod link_repository;
pub mod user_repository;

pub use link_repository::{CodeInsert, LinkRepository};
pub use user_repository::UserRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
