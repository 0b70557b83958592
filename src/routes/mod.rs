// # Routes Module
//
// - HTTP route handlers, grouped by functionality.
// - Handlers only decode the request and call into `UserService` on the
//   blocking pool (see `run_blocking`); status codes
//   and bodies come from the service's `Reply` / `ApiError`.

/// Health check endpoint
pub mod health;

/// Registration and token issuance
pub mod auth;

/// Credential-checked profile reads and changes
pub mod user;

/// Bearer-protected cake read
pub mod cake;

use crate::error::ApiError;
use crate::response::Reply;
use crate::services::UserService;

/// Runs a `UserService` operation on the blocking pool.
///
/// Every operation hashes or verifies a password, which would otherwise hold
/// an async worker thread for the whole Argon2 run.
pub(crate) async fn run_blocking<F>(users: UserService, operation: F) -> Result<Reply, ApiError>
where
    F: FnOnce(&UserService) -> Result<Reply, ApiError> + Send + 'static,
{
    match tokio::task::spawn_blocking(move || operation(&users)).await {
        Ok(result) => result,
        Err(e) => Err(anyhow::Error::new(e)
            .context("User operation task failed")
            .into()),
    }
}
