//! Auth routes for registration and token issuance

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;

use crate::error::ApiError;
use crate::response::Reply;
use crate::routes::run_blocking;
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub favorite_cake: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn register(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Reply, ApiError> {
    run_blocking(app_state.users, move |users| {
        users.register(&payload.email, &payload.password, &payload.favorite_cake)
    })
    .await
}

/// Exchanges email and password for a bearer token, returned as the raw body.
pub async fn jwt(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Reply, ApiError> {
    run_blocking(app_state.users, move |users| {
        users.authenticate(&payload.email, &payload.password)
    })
    .await
}

pub fn create_auth_routes() -> Router<AppState> {
    Router::new()
        .route("/user/register", post(register))
        .route("/user/jwt", post(jwt))
}
