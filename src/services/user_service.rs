//! User operations: registration, login, and credential-checked profile changes.
//!
//! Every operation returns a [`Reply`] or an [`ApiError`]; neither depends on
//! the router, so the operations are exercised directly in tests.

use std::sync::Arc;

use crate::auth::{CredentialVerifier, TokenService};
use crate::database::{User, UserRepository};
use crate::error::{ApiError, CredentialError};
use crate::response::Reply;
use crate::services::validator::{
    validate_cake, validate_email, validate_password, validate_registration,
};

#[derive(Clone)]
pub struct UserService {
    repository: Arc<UserRepository>,
    credentials: Arc<dyn CredentialVerifier>,
    tokens: Arc<TokenService>,
}

impl UserService {
    pub fn new(
        repository: Arc<UserRepository>,
        credentials: Arc<dyn CredentialVerifier>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            repository,
            credentials,
            tokens,
        }
    }

    /// Looks the user up and checks the presented password.
    ///
    /// Writes that follow pass the returned record's `credential` back to the
    /// repository, so they only land if the record still carries it.
    fn check_credentials(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let user = self
            .repository
            .get(email)
            .ok_or(CredentialError::UnknownUser)?;
        if !self.credentials.verify(password, &user.credential) {
            tracing::info!("Rejected password for {}", email);
            return Err(CredentialError::InvalidPassword.into());
        }
        Ok(user)
    }

    pub fn register(
        &self,
        email: &str,
        password: &str,
        favorite_cake: &str,
    ) -> Result<Reply, ApiError> {
        validate_registration(email, password, favorite_cake)?;

        if self.repository.get(email).is_some() {
            return Err(ApiError::EmailTaken);
        }
        let sealed = self.credentials.seal(password)?;
        self.repository
            .insert_new(User::new(email, sealed, favorite_cake))?;

        tracing::info!("Registered {}", email);
        Ok(Reply::created("registered"))
    }

    /// Verify credentials and hand out a bearer token.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<Reply, ApiError> {
        let user = self.check_credentials(email, password)?;
        let token = self.tokens.issue(&user.email)?;
        tracing::info!("Issued token for {}", user.email);
        Ok(Reply::ok(token))
    }

    pub fn show_my_cake(&self, email: &str, password: &str) -> Result<Reply, ApiError> {
        let user = self.check_credentials(email, password)?;
        Ok(Reply::ok(user.favorite_cake))
    }

    pub fn change_cake(
        &self,
        email: &str,
        password: &str,
        new_cake: &str,
    ) -> Result<Reply, ApiError> {
        let verified = self.check_credentials(email, password)?;
        validate_cake(new_cake)?;

        self.repository
            .update_verified(email, &verified.credential, |user| {
                user.favorite_cake = new_cake.to_string()
            })?;
        Ok(Reply::ok("cake successful changed"))
    }

    pub fn change_email(
        &self,
        email: &str,
        password: &str,
        new_email: &str,
    ) -> Result<Reply, ApiError> {
        let verified = self.check_credentials(email, password)?;
        validate_email(new_email)?;

        self.repository
            .rename_verified(email, &verified.credential, new_email)?;
        tracing::info!("Moved account {} to {}", email, new_email);
        Ok(Reply::ok("email successful changed"))
    }

    pub fn change_password(
        &self,
        email: &str,
        password: &str,
        new_password: &str,
    ) -> Result<Reply, ApiError> {
        let verified = self.check_credentials(email, password)?;
        validate_password(new_password)?;

        let sealed = self.credentials.seal(new_password)?;
        self.repository
            .update_verified(email, &verified.credential, |user| user.credential = sealed)?;
        Ok(Reply::ok("password successful changed"))
    }
}
