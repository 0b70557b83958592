//! Configuration module for environment variables and application settings

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Token signing configuration
    pub auth: AuthConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// PEM file holding the RSA public key used to verify tokens
    pub public_key_path: PathBuf,
    /// PEM file holding the RSA private key used to sign tokens
    pub private_key_path: PathBuf,
    /// Lifetime of issued tokens
    pub token_ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
            },
            auth: AuthConfig {
                public_key_path: PathBuf::from("pubkey.rsa"),
                private_key_path: PathBuf::from("privkey.rsa"),
                token_ttl: Duration::hours(1),
            },
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        // PORT is what most hosting platforms inject.
        let port = match env::var("SERVER_PORT").or_else(|_| env::var("PORT")) {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("SERVER_PORT must be a port number, got {raw:?}"))?,
            Err(_) => defaults.server.port,
        };

        Ok(Self {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or(defaults.server.host),
                port,
            },
            auth: AuthConfig {
                public_key_path: env::var("JWT_PUBLIC_KEY_PATH")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.auth.public_key_path),
                private_key_path: env::var("JWT_PRIVATE_KEY_PATH")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.auth.private_key_path),
                token_ttl: Duration::seconds(env_or(
                    "JWT_TTL_SECONDS",
                    defaults.auth.token_ttl.num_seconds(),
                )?),
            },
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{key} has an invalid value {raw:?}")),
        Err(_) => Ok(default),
    }
}
