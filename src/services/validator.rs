//! Field rules for registration and profile changes.
//!
//! Each rule is a pure check with a fixed failure message that callers see
//! verbatim.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

pub const MIN_PASSWORD_LEN: usize = 8;

/// WHATWG "valid e-mail address" shape.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("email is not valid")]
    InvalidEmail,
    #[error("password too short (at least 8 symbols)")]
    PasswordTooShort,
    #[error("favorite cake is empty")]
    EmptyCake,
    #[error("favorite cake is only alphabetic")]
    NonAlphabeticCake,
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

/// Length is counted in characters, not bytes.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() >= MIN_PASSWORD_LEN {
        Ok(())
    } else {
        Err(ValidationError::PasswordTooShort)
    }
}

pub fn validate_cake(cake: &str) -> Result<(), ValidationError> {
    if cake.is_empty() {
        return Err(ValidationError::EmptyCake);
    }
    if !cake.chars().all(char::is_alphabetic) {
        return Err(ValidationError::NonAlphabeticCake);
    }
    Ok(())
}

/// Registration rules in order; the first failure wins.
pub fn validate_registration(
    email: &str,
    password: &str,
    favorite_cake: &str,
) -> Result<(), ValidationError> {
    validate_email(email)?;
    validate_password(password)?;
    validate_cake(favorite_cake)
}
