use serde::Serialize;

use crate::error::RequestError;
use crate::{ApiClient, REGISTER_ENDPOINT};

/// Profile submitted on registration.
#[derive(Clone, Default, Serialize)]
pub struct NewUser {
    /// Account email.
    pub email: String,
    /// Account password. The backend requires at least 8 characters, one digit
    /// and one special character.
    pub password: String,
    /// Country key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// City key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Profile photo as base64 data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

impl NewUser {
    /// Creates a registration with only the required fields.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    /// Sets the country and city.
    #[must_use]
    pub fn location(mut self, country: impl Into<String>, city: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self.city = Some(city.into());
        self
    }

    /// Sets the profile photo.
    #[must_use]
    pub fn photo(mut self, photo: impl Into<String>) -> Self {
        self.photo = Some(photo.into());
        self
    }
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("email", &self.email)
            .field("password", &"***REDACTED***")
            .field("country", &self.country)
            .field("city", &self.city)
            .field("photo", &self.photo.as_ref().map(|_| "<data>"))
            .finish()
    }
}

impl ApiClient {
    /// Create a new account.
    ///
    /// Registration doesn't sign the user in; call [`ApiClient::login`] afterwards.
    ///
    /// # Example
    /// ```rust,ignore
    /// api.register(&NewUser::new("user@example.com", "s3cret!pass1").location("TR", "Istanbul"))
    ///     .await?;
    /// ```
    pub async fn register(&self, user: &NewUser) -> Result<(), RequestError> {
        let request = self.request_post_json(REGISTER_ENDPOINT, user);

        self.execute(REGISTER_ENDPOINT, request).await?;

        Ok(())
    }
}
