//! Shared utilities: code generation, password hashing, db error helpers.

pub mod code_generator;
pub mod db_error;
pub mod password;
pub mod validation;
