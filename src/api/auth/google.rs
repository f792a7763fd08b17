use serde::Serialize;

use super::AuthResponse;
use crate::error::RequestError;
use crate::{ApiClient, GOOGLE_AUTH_ENDPOINT};

#[derive(Serialize)]
struct GoogleToken<'a> {
    token: &'a str,
}

impl ApiClient {
    /// Authenticate with a Google ID token.
    ///
    /// The backend verifies the token with Google and creates the account on
    /// first use.
    pub async fn google_login(&self, id_token: &str) -> Result<AuthResponse, RequestError> {
        let request =
            self.request_post_json(GOOGLE_AUTH_ENDPOINT, &GoogleToken { token: id_token });

        self.execute_json(GOOGLE_AUTH_ENDPOINT, request).await
    }
}
