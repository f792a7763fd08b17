use serde::Deserialize;

pub use login::Credentials;
pub use register::NewUser;

use crate::models::User;

mod google;
mod login;
mod register;

/// Session issued by a successful login.
///
/// Returned by both [`ApiClient::login`](crate::ApiClient::login) and
/// [`ApiClient::google_login`](crate::ApiClient::google_login).
#[derive(Clone, Debug, Deserialize)]
pub struct AuthResponse {
    /// The bearer token to attach to subsequent requests.
    pub access_token: String,
    /// Token scheme *(always `bearer`)*.
    #[serde(default)]
    pub token_type: Option<String>,
    /// The authenticated user.
    pub user: User,
}
