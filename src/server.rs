//! # Server Module
//!
//! HTTP server setup and route configuration.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{middleware, routing::get, Router};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::auth::{protected, Argon2Credentials, AuthMiddleware, CredentialVerifier, TokenService};
use crate::config::Config;
use crate::database::UserRepository;
use crate::routes::{self, cake::GetCake, health::ping};
use crate::services::UserService;

/// Application state shared across all route handlers
#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub auth: AuthMiddleware,
}

impl AppState {
    pub fn new(
        tokens: Arc<TokenService>,
        repository: Arc<UserRepository>,
        credentials: Arc<dyn CredentialVerifier>,
    ) -> Self {
        Self {
            users: UserService::new(repository.clone(), credentials, tokens.clone()),
            auth: AuthMiddleware::new(tokens, repository),
        }
    }
}

/// Assemble the full router. No sockets involved, so tests drive it directly.
pub fn build_router(app_state: AppState) -> Router {
    // Cake endpoint requires a bearer token
    let cake_routes = Router::new()
        .route("/cake", get(protected::<GetCake>))
        .route_layer(middleware::from_fn_with_state(
            app_state.auth.clone(),
            AuthMiddleware::validate_token,
        ));

    Router::new()
        .route("/ping", get(ping))
        .merge(cake_routes)
        .merge(routes::auth::create_auth_routes())
        .merge(routes::user::create_user_routes())
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(app_state)
}

/// Loads keys, binds, and serves until Ctrl+C.
///
/// Unreadable or mismatched key material is fatal: the error is returned
/// before any socket is opened.
pub async fn start(config: Config) -> Result<()> {
    let tokens = TokenService::from_files(
        &config.auth.public_key_path,
        &config.auth.private_key_path,
        config.auth.token_ttl,
    )
    .map_err(|e| {
        tracing::error!("Failed to load signing keys: {}", e);
        e
    })
    .context("Cannot start server without a valid key pair")?;

    let app_state = AppState::new(
        Arc::new(tokens),
        Arc::new(UserRepository::new()),
        Arc::new(Argon2Credentials::new()),
    );
    let app = build_router(app_state);

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr} - port may already be in use"))?;

    tracing::info!("Server started on http://{}, hit Ctrl+C to stop", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server exited with error")?;

    tracing::info!("Good bye :)");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received, draining connections");
}
