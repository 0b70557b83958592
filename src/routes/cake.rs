//! Bearer-protected cake endpoint.

use crate::auth::ProtectedOperation;
use crate::database::User;
use crate::response::Reply;

/// Returns the caller's favorite cake as the plain body.
#[derive(Debug, Default, Clone, Copy)]
pub struct GetCake;

impl ProtectedOperation for GetCake {
    fn invoke(&self, user: &User) -> Reply {
        Reply::ok(user.favorite_cake.clone())
    }
}
