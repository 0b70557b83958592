//! JWT Token Service
//!
//! Issues and verifies RS256-signed bearer tokens. The key pair is loaded once
//! at startup and is read-only afterwards, so a single instance is shared by
//! every request.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ISSUER: &str = "cake-auth-server";

/// JWT Claims structure containing the subject and validity window
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// User email
    pub sub: String,
    /// Token issued at timestamp
    pub iat: i64,
    /// Token expiration timestamp
    pub exp: i64,
    /// Token issuer
    pub iss: String,
}

/// Key material could not be turned into a working signer/verifier pair.
#[derive(Debug, Error)]
pub enum KeyLoadError {
    #[error("failed to read key file {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed {which} key")]
    Malformed {
        which: &'static str,
        #[source]
        source: jsonwebtoken::errors::Error,
    },
    #[error("public key does not verify tokens signed by the private key")]
    Mismatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VerifyError {
    #[error("token is malformed")]
    MalformedToken,
    #[error("token signature is invalid")]
    InvalidSignature,
    #[error("token has expired")]
    Expired,
}

impl From<jsonwebtoken::errors::Error> for VerifyError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => VerifyError::Expired,
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                VerifyError::InvalidSignature
            }
            _ => VerifyError::MalformedToken,
        }
    }
}

/// Token service for issuing and checking bearer tokens
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    /// Load the key pair from PEM files.
    pub fn from_files(
        public_key: impl AsRef<Path>,
        private_key: impl AsRef<Path>,
        ttl: Duration,
    ) -> Result<Self, KeyLoadError> {
        let public_pem = read_key(public_key.as_ref())?;
        let private_pem = read_key(private_key.as_ref())?;
        Self::from_pem(&public_pem, &private_pem, ttl)
    }

    /// Build the service from in-memory PEM data.
    ///
    /// A throwaway token is signed and verified before returning, so a pair that
    /// does not belong together is rejected here rather than on first use.
    pub fn from_pem(public_pem: &[u8], private_pem: &[u8], ttl: Duration) -> Result<Self, KeyLoadError> {
        let decoding_key = DecodingKey::from_rsa_pem(public_pem).map_err(|source| {
            KeyLoadError::Malformed {
                which: "public",
                source,
            }
        })?;
        let encoding_key = EncodingKey::from_rsa_pem(private_pem).map_err(|source| {
            KeyLoadError::Malformed {
                which: "private",
                source,
            }
        })?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[ISSUER]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);
        validation.leeway = 0;

        let service = Self {
            encoding_key,
            decoding_key,
            validation,
            ttl,
        };
        service.self_check()?;
        Ok(service)
    }

    fn self_check(&self) -> Result<(), KeyLoadError> {
        let token = encode(
            &Header::new(Algorithm::RS256),
            &self.claims_for("key-check", Utc::now()),
            &self.encoding_key,
        )
        .map_err(|source| KeyLoadError::Malformed {
            which: "private",
            source,
        })?;
        self.decode_claims(&token)
            .map(|_| ())
            .map_err(|_| KeyLoadError::Mismatch)
    }

    fn claims_for(&self, subject: &str, issued_at: DateTime<Utc>) -> Claims {
        Claims {
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
            iss: ISSUER.to_string(),
        }
    }

    /// Generate a token for `subject` valid from now
    pub fn issue(&self, subject: &str) -> Result<String> {
        self.issue_at(subject, Utc::now())
    }

    /// Generate a token for `subject` as if issued at `issued_at`
    pub fn issue_at(&self, subject: &str, issued_at: DateTime<Utc>) -> Result<String> {
        let claims = self.claims_for(subject, issued_at);
        encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)
            .context("Failed to encode JWT token")
    }

    /// Validate a token and return its claims
    pub fn decode_claims(&self, token: &str) -> Result<Claims, VerifyError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }

    /// Validate a token and return the subject it was issued for
    pub fn verify(&self, token: &str) -> Result<String, VerifyError> {
        self.decode_claims(token).map(|claims| claims.sub)
    }
}

fn read_key(path: &Path) -> Result<Vec<u8>, KeyLoadError> {
    fs::read(path).map_err(|source| KeyLoadError::Read {
        path: path.to_path_buf(),
        source,
    })
}
