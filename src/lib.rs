//! # Cake Auth Server
//!
//! A small identity service: users register with an email, a password and a
//! favorite cake, exchange their credentials for an RS256-signed bearer token,
//! and use that token (or their credentials) to read and change their profile.
//!
//! ## Architecture
//! - `database`: in-memory, lock-guarded user repository
//! - `services`: field validation and the user operations
//! - `auth`: token service, credential verifier, bearer middleware
//! - `routes`: axum handlers mapping JSON bodies onto the user operations
//! - `server`: router assembly and process lifecycle
//! - `config`: environment configuration

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod response;
pub mod routes;
pub mod server;
pub mod services;
