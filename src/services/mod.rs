//! # Services Module
//!
//! Business logic for user accounts: field validation and the user operations
//! built on top of the repository.

pub mod user_service;
pub mod validator;

pub use user_service::UserService;
