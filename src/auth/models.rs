//! Authentication Models
//!
//! Data placed on a request once its bearer token has been accepted.

use crate::database::User;

/// The repository record a verified token resolved to.
///
/// Fetched fresh on every request, so it reflects changes made after the token
/// was issued.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);
