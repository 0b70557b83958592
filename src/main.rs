//! # Cake Auth Server
//!
//! ## Environment Setup
//! Key material and bind address come from the environment (or `.env`):
//! ```bash
//! openssl genrsa -out privkey.rsa 2048
//! openssl rsa -in privkey.rsa -pubout -out pubkey.rsa
//! ```
//!
//! ## Running the Server
//! ```bash
//! RUST_LOG=info cargo run
//! ```
//!
//! The server listens on `http://0.0.0.0:8000` by default.

use cake_auth_server::{config::Config, server};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real environments set variables directly.
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false) // Don't show module targets for cleaner output
                .compact(),
        )
        .init();

    tracing::info!("Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    tracing::info!("Build profile: {}", if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    });

    let config = Config::from_env()?;
    server::start(config).await
}
