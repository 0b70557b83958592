//! Profile routes. Each request re-presents the account's email and password.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::error::ApiError;
use crate::response::Reply;
use crate::routes::auth::LoginRequest;
use crate::routes::run_blocking;
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct ChangeCakeRequest {
    pub email: String,
    pub password: String,
    pub new_cake: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangeEmailRequest {
    pub email: String,
    pub password: String,
    pub new_email: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub email: String,
    pub password: String,
    pub new_pass: String,
}

pub async fn show_my_cake(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Reply, ApiError> {
    run_blocking(app_state.users, move |users| {
        users.show_my_cake(&payload.email, &payload.password)
    })
    .await
}

pub async fn change_cake(
    State(app_state): State<AppState>,
    Json(payload): Json<ChangeCakeRequest>,
) -> Result<Reply, ApiError> {
    run_blocking(app_state.users, move |users| {
        users.change_cake(&payload.email, &payload.password, &payload.new_cake)
    })
    .await
}

pub async fn change_email(
    State(app_state): State<AppState>,
    Json(payload): Json<ChangeEmailRequest>,
) -> Result<Reply, ApiError> {
    run_blocking(app_state.users, move |users| {
        users.change_email(&payload.email, &payload.password, &payload.new_email)
    })
    .await
}

pub async fn change_password(
    State(app_state): State<AppState>,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<Reply, ApiError> {
    run_blocking(app_state.users, move |users| {
        users.change_password(&payload.email, &payload.password, &payload.new_pass)
    })
    .await
}

pub fn create_user_routes() -> Router<AppState> {
    Router::new()
        .route("/user/me", get(show_my_cake).post(show_my_cake))
        .route("/user/favorite_cake", post(change_cake))
        .route("/user/email", post(change_email))
        .route("/user/password", post(change_password))
}
