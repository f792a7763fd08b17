//! Hook through which the HTTP layer forces a navigation.

use parking_lot::Mutex;

/// Performs a full navigation to another view.
///
/// The HTTP layer calls this after discarding a session the server rejected, so
/// the application can reload from a clean state on the login view.
pub trait Navigator: Send + Sync {
    /// Leaves the current view and loads `location` from scratch.
    fn navigate(&self, location: &str);
}

/// Records every navigation in memory.
#[derive(Debug, Default)]
pub struct MemoryNavigator {
    history: Mutex<Vec<String>>,
}

impl MemoryNavigator {
    /// Creates a navigator with an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent location, if any navigation happened.
    #[must_use]
    pub fn location(&self) -> Option<String> {
        self.history.lock().last().cloned()
    }

    /// Every location navigated to, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.history.lock().clone()
    }
}

impl Navigator for MemoryNavigator {
    fn navigate(&self, location: &str) {
        self.history.lock().push(location.to_string());
    }
}
