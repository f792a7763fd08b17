//! `movie-catalog-client` is the non-visual core of the movie catalog client:
//! an authenticated wrapper around the catalog's REST API, the session/state
//! store driven by the views, and the route guard protecting the watchlist.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use movie_catalog_client::{
//!     ApiClient, Credentials, MemoryNavigator, MemoryTokenStorage, Router, Store,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = ApiClient::builder("http://localhost:8000")
//!         .storage(Arc::new(MemoryTokenStorage::new()))
//!         .navigator(Arc::new(MemoryNavigator::new()))
//!         .build()?;
//!
//!     let store = Store::new(api);
//!
//!     let outcome = store
//!         .login(&Credentials::new("user@example.com", "s3cret!pass"))
//!         .await;
//!
//!     if !outcome.success {
//!         eprintln!("{}", outcome.message.unwrap_or_default());
//!     }
//!
//!     let navigation = Router::new().resolve("/watchlist", &store);
//!     println!("{navigation:?}");
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::nursery)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use reqwest::header;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

pub use api::auth::{AuthResponse, Credentials, NewUser};
pub use api::movies::{MovieListBuilder, RatingInput, SearchBuilder, SearchType};
pub use api::profile::PhotoUpload;
pub use config::ClientConfig;
pub use error::*;
pub use locale::Locale;
pub use messages::{failure_message, AuthAction};
pub use models::*;
pub use navigation::{MemoryNavigator, Navigator};
pub use reqwest::multipart::{Form, Part};
pub use router::{Navigation, Route, Router, Session};
pub use storage::{FileTokenStorage, MemoryTokenStorage, TokenStorage};
pub use store::{ActionOutcome, Store, StoreState};

pub(crate) mod api;
pub mod config;
pub mod error;
mod locale;
pub mod messages;
mod models;
mod navigation;
pub mod router;
mod storage;
pub mod store;

/// Path of the password login endpoint.
pub const LOGIN_ENDPOINT: &str = "/login";
/// Path of the registration endpoint.
pub const REGISTER_ENDPOINT: &str = "/register";
/// Path of the Google sign-in endpoint.
pub const GOOGLE_AUTH_ENDPOINT: &str = "/auth/google";
/// View the client is sent to when the server rejects its session.
pub const LOGIN_VIEW: &str = "/login";

/// Entry points reachable without a session. A 401 from them means bad
/// credentials, not an expired session.
const UNAUTHENTICATED_ENDPOINTS: [&str; 3] =
    [LOGIN_ENDPOINT, REGISTER_ENDPOINT, GOOGLE_AUTH_ENDPOINT];

/// Returns `true` when `path` targets one of the unauthenticated entry points.
#[must_use]
pub fn is_unauthenticated_endpoint(path: &str) -> bool {
    UNAUTHENTICATED_ENDPOINTS
        .iter()
        .any(|endpoint| path.contains(endpoint))
}

/// A client for the movie catalog REST API.
///
/// Clones share the same bearer token, token storage and navigator, so the
/// [`Store`] and any view holding a clone observe the same session.
///
/// The `Debug` implementation for this struct redacts the bearer token
/// to prevent accidental exposure in logs.
#[derive(Clone)]
pub struct ApiClient {
    pub(crate) base_url: String,
    pub(crate) reqwest_client: reqwest::Client,
    auth_token: Arc<RwLock<Option<String>>>,
    storage: Arc<dyn TokenStorage>,
    navigator: Arc<dyn Navigator>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field(
                "auth_token",
                &self.auth_token.read().as_ref().map(|_| "***REDACTED***"),
            )
            .field("reqwest_client", &"Client")
            .finish_non_exhaustive()
    }
}

/// Builder for [`ApiClient`].
pub struct ApiClientBuilder {
    base_url: String,
    storage: Option<Arc<dyn TokenStorage>>,
    navigator: Option<Arc<dyn Navigator>>,
    reqwest_client: Option<reqwest::Client>,
}

impl ApiClientBuilder {
    /// Where the session token is persisted *(default: in memory)*.
    #[must_use]
    pub fn storage(mut self, storage: Arc<dyn TokenStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// What performs the forced navigation to the login view *(default: in memory)*.
    #[must_use]
    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Use a custom `reqwest` client instead of the default one.
    ///
    /// # Example
    /// ```rust,ignore
    /// use std::time::Duration;
    ///
    /// let reqwest_client = reqwest::Client::builder()
    ///     .timeout(Duration::from_secs(60))
    ///     .build()?;
    ///
    /// let api = ApiClient::builder("http://localhost:8000")
    ///     .reqwest_client(reqwest_client)
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn reqwest_client(mut self, client: reqwest::Client) -> Self {
        self.reqwest_client = Some(client);
        self
    }

    /// Creates the client.
    ///
    /// A token already present in storage becomes the bearer token of every
    /// request sent by the client.
    pub fn build(self) -> Result<ApiClient, BuildError> {
        let trimmed_url = self.base_url.trim_end_matches('/');

        if !(trimmed_url.starts_with("http://") || trimmed_url.starts_with("https://")) {
            return Err(BuildError::InvalidBaseUrl(self.base_url));
        }

        let reqwest_client = match self.reqwest_client {
            Some(client) => client,
            None => reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .connect_timeout(Duration::from_secs(10))
                .build()?,
        };

        let storage = self
            .storage
            .unwrap_or_else(|| Arc::new(MemoryTokenStorage::new()));
        let navigator = self
            .navigator
            .unwrap_or_else(|| Arc::new(MemoryNavigator::new()));

        let stored_token = match storage.get() {
            Ok(token) => token.filter(|token| !token.is_empty()),
            Err(error) => {
                warn!(error = %error, "Could not read the stored session token");
                None
            }
        };

        if stored_token.is_some() {
            debug!("Restoring session token from storage");
        }

        Ok(ApiClient {
            base_url: trimmed_url.to_string(),
            reqwest_client,
            auth_token: Arc::new(RwLock::new(stored_token)),
            storage,
            navigator,
        })
    }
}

impl ApiClient {
    /// Starts building a client for the API served at `base_url`.
    ///
    /// # Example
    /// ```rust,ignore
    /// let api = ApiClient::builder("http://localhost:8000").build()?;
    /// ```
    #[must_use]
    pub fn builder(base_url: &str) -> ApiClientBuilder {
        ApiClientBuilder {
            base_url: base_url.to_string(),
            storage: None,
            navigator: None,
            reqwest_client: None,
        }
    }

    /// Returns the base URL of the API.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Installs or removes the bearer token attached to every request.
    ///
    /// An empty token removes it. Storage is left untouched; persisting the
    /// token is the [`Store`]'s job.
    pub fn set_auth_token(&self, token: Option<&str>) {
        *self.auth_token.write() = token
            .filter(|token| !token.is_empty())
            .map(ToString::to_string);
    }

    /// The bearer token currently attached to requests.
    #[must_use]
    pub fn auth_token(&self) -> Option<String> {
        self.auth_token.read().clone()
    }

    /// Whether requests currently carry a bearer token.
    #[must_use]
    pub fn has_auth_token(&self) -> bool {
        self.auth_token.read().is_some()
    }

    /// The slot the session token is persisted in.
    #[must_use]
    pub fn token_storage(&self) -> &Arc<dyn TokenStorage> {
        &self.storage
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Adds the bearer token to the request, if one is installed.
    pub(crate) fn with_authorization_token(&self, request_builder: RequestBuilder) -> RequestBuilder {
        match self.auth_token.read().as_deref() {
            Some(token) => request_builder.bearer_auth(token),
            None => request_builder,
        }
    }

    /// Starts a JSON request to `path`. Every request but the multipart ones
    /// goes through here, whichever `reqwest` client the builder was given.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.reqwest_client
            .request(method, self.url(path))
            .header(header::CONTENT_TYPE, "application/json")
    }

    /// Creates a GET request builder for `path`, with optional query parameters.
    pub(crate) fn request_get(&self, path: &str, params: Option<Vec<(&str, &str)>>) -> RequestBuilder {
        let mut request_builder = self
            .request(Method::GET, path)
            .header(header::ACCEPT, "application/json");

        if let Some(params) = params {
            request_builder = request_builder.query(&params);
        }

        self.with_authorization_token(request_builder)
    }

    /// Creates a body-less POST request builder for `path`.
    pub(crate) fn request_post(&self, path: &str) -> RequestBuilder {
        let request_builder = self.request(Method::POST, path);
        self.with_authorization_token(request_builder)
    }

    /// Creates a POST request builder with a JSON body for `path`.
    pub(crate) fn request_post_json<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> RequestBuilder {
        let request_builder = self.request(Method::POST, path).json(body);
        self.with_authorization_token(request_builder)
    }

    /// Creates a POST request builder with a multipart body for `path`.
    pub(crate) fn request_post_form(&self, path: &str, form: Form) -> RequestBuilder {
        let request_builder = self.reqwest_client.post(self.url(path)).multipart(form);
        self.with_authorization_token(request_builder)
    }

    /// Sends the request and turns every non-success status into a [`RequestError`].
    ///
    /// A 401 on a session-protected path discards the session before the error
    /// is handed back.
    pub(crate) async fn execute(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> Result<reqwest::Response, RequestError> {
        debug!(path, "Sending request");

        let response = request.send().await.map_err(|error| {
            warn!(path, error = %error, "Request failed before a response was received");
            RequestError::from_transport(&error)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        debug!(path, status = status.as_u16(), "Request rejected");

        let detail = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail);

        if status == StatusCode::UNAUTHORIZED {
            self.handle_unauthorized(path);
        }

        Err(RequestError::from_status(status, detail))
    }

    /// Sends the request and decodes its JSON body.
    pub(crate) async fn execute_json<T: DeserializeOwned>(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> Result<T, RequestError> {
        let response = self.execute(path, request).await?;

        response
            .json::<T>()
            .await
            .map_err(|error| RequestError::ParseError(error.to_string()))
    }

    fn handle_unauthorized(&self, path: &str) {
        if is_unauthenticated_endpoint(path) {
            return;
        }

        let stored_token = match self.storage.get() {
            Ok(token) => token.filter(|token| !token.is_empty()),
            Err(error) => {
                warn!(error = %error, "Could not read the stored session token");
                None
            }
        };

        if stored_token.is_none() {
            return;
        }

        warn!(path, "Session rejected by the server, returning to the login view");

        if let Err(error) = self.storage.remove() {
            warn!(error = %error, "Could not remove the stored session token");
        }
        self.set_auth_token(None);
        self.navigator.navigate(LOGIN_VIEW);
    }
}
