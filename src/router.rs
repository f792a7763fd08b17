//! Route table and the guard protecting session-only views.

use core::fmt;

/// Anything that can tell whether a session is present.
pub trait Session {
    /// Whether a session token is held.
    fn has_session(&self) -> bool;
}

impl Session for bool {
    fn has_session(&self) -> bool {
        *self
    }
}

/// The client's views.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`: popular movies.
    Home,
    /// `/login`
    Login,
    /// `/register`
    Register,
    /// `/movie/:id`: a movie's detail page.
    MovieDetail {
        /// The `:id` path segment.
        id: String,
    },
    /// `/search`
    Search,
    /// `/watchlist`: the signed-in user's watchlist.
    Watchlist,
}

impl Route {
    /// Matches a location against the route table.
    ///
    /// Query strings and fragments are ignored, as is a single trailing `/`.
    #[must_use]
    pub fn parse(location: &str) -> Option<Self> {
        let path = location
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let path = if path.len() > 1 {
            path.strip_suffix('/').unwrap_or(path)
        } else {
            path
        };

        match path {
            "/" => Some(Self::Home),
            "/login" => Some(Self::Login),
            "/register" => Some(Self::Register),
            "/search" => Some(Self::Search),
            "/watchlist" => Some(Self::Watchlist),
            _ => {
                let id = path.strip_prefix("/movie/")?;

                (!id.is_empty() && !id.contains('/')).then(|| Self::MovieDetail { id: id.to_string() })
            }
        }
    }

    /// The route's name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Login => "Login",
            Self::Register => "Register",
            Self::MovieDetail { .. } => "MovieDetail",
            Self::Search => "Search",
            Self::Watchlist => "Watchlist",
        }
    }

    /// The location of this route.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Login => "/login".to_string(),
            Self::Register => "/register".to_string(),
            Self::MovieDetail { id } => format!("/movie/{id}"),
            Self::Search => "/search".to_string(),
            Self::Watchlist => "/watchlist".to_string(),
        }
    }

    /// Whether the route is only reachable with a session.
    #[must_use]
    pub const fn requires_auth(&self) -> bool {
        matches!(self, Self::Watchlist)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Decision taken for a navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Go to the requested route.
    Proceed(Route),
    /// Go to this route instead.
    Redirect(Route),
    /// No route matches the location.
    NotFound(String),
}

/// Runs the route guard and keeps track of the current location.
#[derive(Debug, Clone, Default)]
pub struct Router {
    current: Option<Route>,
}

impl Router {
    /// Creates a router that hasn't navigated anywhere yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// The route the last successful navigation ended on.
    #[must_use]
    pub const fn current(&self) -> Option<&Route> {
        self.current.as_ref()
    }

    /// Decides where an attempt to reach `location` ends up.
    ///
    /// Routes requiring authentication redirect to [`Route::Login`] when
    /// `session` holds no token.
    #[must_use]
    pub fn resolve(&self, location: &str, session: &impl Session) -> Navigation {
        let Some(route) = Route::parse(location) else {
            return Navigation::NotFound(location.to_string());
        };

        if route.requires_auth() && !session.has_session() {
            tracing::debug!(route = route.name(), "No session, redirecting to login");
            return Navigation::Redirect(Route::Login);
        }

        Navigation::Proceed(route)
    }

    /// Navigates to `location`, following the guard's decision.
    ///
    /// The current route is left unchanged when nothing matches.
    pub fn push(&mut self, location: &str, session: &impl Session) -> Navigation {
        let navigation = self.resolve(location, session);

        match &navigation {
            Navigation::Proceed(route) | Navigation::Redirect(route) => {
                self.current = Some(route.clone());
            }
            Navigation::NotFound(_) => {}
        }

        navigation
    }
}
