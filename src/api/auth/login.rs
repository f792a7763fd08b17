use serde::Serialize;

use super::AuthResponse;
use crate::error::RequestError;
use crate::{ApiClient, LOGIN_ENDPOINT};

/// Email and password of an account.
///
/// The `Debug` implementation redacts the password.
#[derive(Clone, Serialize)]
pub struct Credentials {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

impl Credentials {
    /// Creates credentials from an email and a password.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***REDACTED***")
            .finish()
    }
}

impl ApiClient {
    /// Authenticate with an **email** and **password**.
    ///
    /// This only returns the issued session. Installing and persisting it is
    /// up to the caller, see [`Store::login`](crate::Store::login).
    ///
    /// # Example
    /// ```rust,ignore
    /// let session = api
    ///     .login(&Credentials::new("user@example.com", "s3cret!pass"))
    ///     .await?;
    ///
    /// println!("Signed in as {}", session.user.email);
    /// ```
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, RequestError> {
        let request = self.request_post_json(LOGIN_ENDPOINT, credentials);

        self.execute_json(LOGIN_ENDPOINT, request).await
    }
}
