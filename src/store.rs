//! Session and movie-list state shared by the views.
//!
//! The [`Store`] is an ordinary value: create one per application (or per
//! test) and hand it, or a clone of it, to whatever needs it. State only
//! changes through the mutation methods; the async actions wrap one API call
//! each and report back with an [`ActionOutcome`].

use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::api::auth::{AuthResponse, Credentials, NewUser};
use crate::error::RequestError;
use crate::locale::Locale;
use crate::messages::{failure_message, AuthAction};
use crate::models::{Movie, User};
use crate::router::Session;
use crate::ApiClient;

/// Result of an action, ready to be rendered by a view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionOutcome {
    /// Whether the action succeeded.
    pub success: bool,
    /// What to tell the user when it didn't.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ActionOutcome {
    /// A successful outcome.
    #[must_use]
    pub const fn succeeded() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    /// A failed outcome carrying `message`.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

/// Snapshot of everything the store holds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    /// The signed-in user, known after a login in this process.
    pub user: Option<User>,
    /// The session token.
    pub token: Option<String>,
    /// The last fetched list of movies.
    pub movies: Vec<Movie>,
    /// Whether an action is running.
    pub loading: bool,
}

/// What the store keeps next to the client's session token.
#[derive(Debug, Default)]
struct Shared {
    user: Option<User>,
    movies: Vec<Movie>,
    loading: bool,
}

/// Client-side state container.
///
/// The session token lives in the [`ApiClient`], so a session the client
/// discards after a 401 is gone from the store too, whichever call got the
/// 401. Clones share the same state, and the actions only need `&self`:
/// a view can read [`Store::is_loading`] while an action is pending.
#[derive(Debug, Clone)]
pub struct Store {
    api: ApiClient,
    shared: Arc<RwLock<Shared>>,
}

impl Store {
    /// Creates a store on top of `api`, picking up a session token left in storage.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        match api.token_storage().get() {
            Ok(token) => {
                if let Some(token) = token.filter(|token| !token.is_empty()) {
                    api.set_auth_token(Some(&token));
                }
            }
            Err(error) => warn!(error = %error, "Could not read the stored session token"),
        }

        Self {
            api,
            shared: Arc::new(RwLock::new(Shared::default())),
        }
    }

    /// The API client the actions go through.
    #[must_use]
    pub const fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Copy of the current state.
    #[must_use]
    pub fn state(&self) -> StoreState {
        let shared = self.shared.read();
        let token = self.api.auth_token();

        StoreState {
            user: token.as_ref().and(shared.user.clone()),
            token,
            movies: shared.movies.clone(),
            loading: shared.loading,
        }
    }

    /// Whether a session token is held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.api.has_auth_token()
    }

    /// The signed-in user, if known.
    ///
    /// Only reported while a session is held.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        if !self.is_authenticated() {
            return None;
        }

        self.shared.read().user.clone()
    }

    /// The session token, if any.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.api.auth_token()
    }

    /// The last fetched movies.
    #[must_use]
    pub fn movies(&self) -> Vec<Movie> {
        self.shared.read().movies.clone()
    }

    /// Whether an action is running.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.shared.read().loading
    }

    // Mutations

    /// Replaces the signed-in user.
    pub fn set_user(&self, user: Option<User>) {
        self.shared.write().user = user;
    }

    /// Replaces the session token.
    ///
    /// A non-empty token is persisted and attached to every following request;
    /// `None` or an empty token removes it from storage and from the requests.
    pub fn set_token(&self, token: Option<String>) {
        let token = token.filter(|token| !token.is_empty());
        let storage = self.api.token_storage();

        let persisted = match token.as_deref() {
            Some(token) => storage.set(token),
            None => storage.remove(),
        };

        if let Err(error) = persisted {
            warn!(error = %error, "Could not persist the session token");
        }

        self.api.set_auth_token(token.as_deref());
    }

    /// Replaces the movie list.
    pub fn set_movies(&self, movies: Vec<Movie>) {
        self.shared.write().movies = movies;
    }

    /// Sets the loading flag.
    pub fn set_loading(&self, loading: bool) {
        self.shared.write().loading = loading;
    }

    /// Forgets the user and the token, in memory, in storage and on the client.
    pub fn logout(&self) {
        let mut shared = self.shared.write();

        if let Err(error) = self.api.token_storage().remove() {
            warn!(error = %error, "Could not remove the stored session token");
        }

        self.api.set_auth_token(None);
        shared.user = None;
    }

    // Actions

    /// Signs in with an email and password.
    pub async fn login(&self, credentials: &Credentials) -> ActionOutcome {
        self.set_loading(true);
        let result = self.api.login(credentials).await;
        let outcome = self.complete_sign_in(AuthAction::Login, result);
        self.set_loading(false);

        outcome
    }

    /// Creates an account. The user stays signed out.
    pub async fn register(&self, user: &NewUser) -> ActionOutcome {
        self.set_loading(true);

        let outcome = match self.api.register(user).await {
            Ok(()) => ActionOutcome::succeeded(),
            Err(error) => {
                debug!(error = %error, "Registration failed");
                ActionOutcome::failed(failure_message(AuthAction::Register, &error))
            }
        };

        self.set_loading(false);

        outcome
    }

    /// Signs in with a Google ID token.
    pub async fn google_login(&self, id_token: &str) -> ActionOutcome {
        self.set_loading(true);
        let result = self.api.google_login(id_token).await;
        let outcome = self.complete_sign_in(AuthAction::GoogleLogin, result);
        self.set_loading(false);

        outcome
    }

    /// Replaces the movie list with the most popular movies in `lang` *(default to English)*.
    ///
    /// Failures are logged and leave the current list in place.
    pub async fn fetch_movies(&self, lang: Option<Locale>) {
        self.set_loading(true);

        let result = self.api.movies().lang(lang.unwrap_or_default()).call().await;

        match result {
            Ok(movies) => self.set_movies(movies),
            Err(error) => error!(error = %error, "Error fetching movies"),
        }

        self.set_loading(false);
    }

    /// Signs out. No request is sent.
    pub fn logout_user(&self) {
        self.logout();
    }

    fn complete_sign_in(
        &self,
        action: AuthAction,
        result: Result<AuthResponse, RequestError>,
    ) -> ActionOutcome {
        match result {
            Ok(session) => {
                self.set_token(Some(session.access_token));
                self.set_user(Some(session.user));
                ActionOutcome::succeeded()
            }
            Err(error) => {
                debug!(error = %error, ?action, "Sign-in failed");
                ActionOutcome::failed(failure_message(action, &error))
            }
        }
    }
}

impl Session for Store {
    fn has_session(&self) -> bool {
        self.is_authenticated()
    }
}
