//! Client-facing error taxonomy.
//!
//! Every failure an operation can produce ends up as an [`ApiError`], which
//! renders to a fixed status and plain-text body. Internal detail is logged,
//! never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::database::RepositoryError;
use crate::services::validator::ValidationError;

/// Wrong or unknown login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("there is no such user")]
    UnknownUser,
    #[error("invalid login params")]
    InvalidPassword,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Credentials(#[from] CredentialError),
    #[error("unauthorized")]
    Unauthorized,
    #[error("user already exists")]
    EmailTaken,
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Credentials(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::EmailTaken => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::EmailTaken(_) => ApiError::EmailTaken,
            // The record vanished or changed hands between the credential check and the write.
            RepositoryError::NotFound(_) => ApiError::Credentials(CredentialError::UnknownUser),
            RepositoryError::StaleCredential(_) => {
                ApiError::Credentials(CredentialError::InvalidPassword)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(source) = &self {
            tracing::error!("Internal error: {:#}", source);
        }
        (self.status(), self.to_string()).into_response()
    }
}
