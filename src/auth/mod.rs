//! # Authentication Module
//!
//! Handles token issuance and validation, credential checks, and the
//! middleware that guards protected endpoints.

pub mod credentials;
pub mod jwt;
pub mod middleware;
pub mod models;

pub use credentials::{Argon2Credentials, CredentialVerifier};
pub use jwt::{Claims, KeyLoadError, TokenService, VerifyError};
pub use middleware::{protected, AuthMiddleware, ProtectedOperation};
pub use models::AuthUser;
