//! Authentication Middleware
//!
//! Axum middleware for bearer-token validation and user resolution.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
    Extension,
};

use crate::auth::{jwt::TokenService, models::AuthUser};
use crate::database::{User, UserRepository};
use crate::error::ApiError;
use crate::response::Reply;

/// An operation that only runs for an authenticated user.
pub trait ProtectedOperation: Send + Sync + 'static {
    fn invoke(&self, user: &User) -> Reply;
}

/// Handler adapter: runs `P` with the user injected by [`AuthMiddleware::validate_token`].
pub async fn protected<P>(Extension(AuthUser(user)): Extension<AuthUser>) -> Reply
where
    P: ProtectedOperation + Default,
{
    P::default().invoke(&user)
}

/// Resolves `Authorization: Bearer <token>` to a live user record.
#[derive(Clone)]
pub struct AuthMiddleware {
    tokens: Arc<TokenService>,
    repository: Arc<UserRepository>,
}

impl AuthMiddleware {
    pub fn new(tokens: Arc<TokenService>, repository: Arc<UserRepository>) -> Self {
        Self { tokens, repository }
    }

    /// The token part of a well-formed bearer header, if any.
    pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .filter(|token| !token.is_empty() && !token.contains(char::is_whitespace))
    }

    /// Every failure collapses to `ApiError::Unauthorized`; the reason is only logged.
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<User, ApiError> {
        let Some(token) = Self::bearer_token(headers) else {
            tracing::warn!("[AuthMiddleware] Missing or malformed Authorization header");
            return Err(ApiError::Unauthorized);
        };

        let subject = self.tokens.verify(token).map_err(|e| {
            tracing::warn!("[AuthMiddleware] Token rejected: {}", e);
            ApiError::Unauthorized
        })?;

        match self.repository.get(&subject) {
            Some(user) => Ok(user),
            None => {
                tracing::warn!("[AuthMiddleware] Token subject {} is not a registered user", subject);
                Err(ApiError::Unauthorized)
            }
        }
    }

    /// Middleware function for routes behind a bearer token
    pub async fn validate_token(
        State(auth): State<AuthMiddleware>,
        mut req: Request,
        next: Next,
    ) -> Response {
        tracing::debug!("[AuthMiddleware] Incoming request: {} {}", req.method(), req.uri());

        let user = match auth.authenticate(req.headers()) {
            Ok(user) => user,
            Err(e) => return e.into_response(),
        };
        tracing::debug!("[AuthMiddleware] Authenticated {}", user.email);

        req.extensions_mut().insert(AuthUser(user));
        next.run(req).await
    }
}
