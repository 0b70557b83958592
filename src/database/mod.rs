//! # Database Module
//!
//! In-memory user storage. Records live for the lifetime of the process.

pub mod models;
pub mod repository;

pub use models::User;
pub use repository::{RepositoryError, UserRepository};
