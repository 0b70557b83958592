// Database Models
//
// In-memory records owned by the user repository.

/// User account information.
///
/// `email` is the primary key and the subject of issued tokens. `credential`
/// holds the sealed form produced by a `CredentialVerifier` and never leaves
/// the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub email: String,
    pub credential: String,
    pub favorite_cake: String,
}

impl User {
    pub fn new(
        email: impl Into<String>,
        credential: impl Into<String>,
        favorite_cake: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            credential: credential.into(),
            favorite_cake: favorite_cake.into(),
        }
    }
}
