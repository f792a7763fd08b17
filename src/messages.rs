//! User-facing messages for failed authentication actions.
//!
//! The views render these strings as-is, so everything a user can see about a
//! failed login, registration or Google sign-in is decided here.

use crate::error::{ErrorDetail, RequestError};

const SPECIAL_CHARACTER_RULE: &str = "Password must contain at least 1 non-alphanumeric character";
const SPECIAL_CHARACTER_HINT: &str =
    "Password must contain at least one special character (!@#$%^&* etc.)";
const VALUE_ERROR_PREFIX: &str = "Value error, ";
const DUPLICATE_EMAIL: &str = "Email already registered";

/// The action a failure message is picked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAction {
    /// Email/password login.
    Login,
    /// Account registration.
    Register,
    /// Google sign-in.
    GoogleLogin,
}

impl AuthAction {
    const fn default_message(self) -> &'static str {
        match self {
            Self::Login => "Login failed",
            Self::Register => "Registration failed",
            Self::GoogleLogin => "Google login failed",
        }
    }
}

/// Picks the message shown to the user when `action` failed with `error`.
///
/// Known statuses get a fixed sentence. Anything else falls back to the
/// backend's `detail` message, then to the error's own description.
#[must_use]
pub fn failure_message(action: AuthAction, error: &RequestError) -> String {
    let specific = match action {
        AuthAction::Login => login_message(error),
        AuthAction::Register => register_message(error),
        AuthAction::GoogleLogin => google_message(error),
    };

    specific
        .or_else(|| error.detail_message().map(ToString::to_string))
        .unwrap_or_else(|| fallback(action, error))
}

fn login_message(error: &RequestError) -> Option<String> {
    match error {
        RequestError::Unauthorized(_) => {
            Some("Invalid credentials. Please check your email and password.".to_string())
        }
        RequestError::Validation(detail) => Some(validation_message(
            AuthAction::Login,
            detail.as_ref(),
            "Please enter a valid email address and password.",
        )),
        RequestError::TooManyRequests(_) => {
            Some("Too many login attempts. Please try again later.".to_string())
        }
        RequestError::ServerError(_) => Some("Server error. Please try again later.".to_string()),
        _ => None,
    }
}

fn register_message(error: &RequestError) -> Option<String> {
    match error {
        RequestError::BadRequest(detail) => Some(
            match detail.as_ref().and_then(ErrorDetail::as_message) {
                Some(message) if message.contains(DUPLICATE_EMAIL) => {
                    "An account with this email already exists. Please use a different email or try logging in."
                        .to_string()
                }
                Some(message) if !message.is_empty() => message.to_string(),
                _ => "Invalid registration data. Please check your information.".to_string(),
            },
        ),
        RequestError::Validation(detail) => Some(validation_message(
            AuthAction::Register,
            detail.as_ref(),
            "Please fill in all required fields correctly.",
        )),
        RequestError::ServerError(_) => Some("Server error. Please try again later.".to_string()),
        _ => None,
    }
}

fn google_message(error: &RequestError) -> Option<String> {
    match error {
        RequestError::BadRequest(_) => {
            Some("Invalid Google authentication. Please try again.".to_string())
        }
        RequestError::Unauthorized(_) => Some(
            "Google authentication failed. Please check your account permissions.".to_string(),
        ),
        RequestError::ServerError(_) => {
            Some("Server error during Google login. Please try again later.".to_string())
        }
        _ => None,
    }
}

/// Message for a 422 response: the first field error, cleaned up.
///
/// `not_a_list` is used when the backend didn't send a field error list. An
/// empty list keeps the action's generic message.
fn validation_message(action: AuthAction, detail: Option<&ErrorDetail>, not_a_list: &str) -> String {
    let Some(fields) = detail.and_then(ErrorDetail::as_fields) else {
        return not_a_list.to_string();
    };

    let Some(first) = fields.first() else {
        return action.default_message().to_string();
    };

    match first.msg.as_deref() {
        Some(message) if !message.is_empty() => clean_validation_message(message),
        _ => "Please check your input and try again.".to_string(),
    }
}

fn clean_validation_message(message: &str) -> String {
    if message.contains(SPECIAL_CHARACTER_RULE) {
        SPECIAL_CHARACTER_HINT.to_string()
    } else {
        message.replacen(VALUE_ERROR_PREFIX, "", 1)
    }
}

/// Last resort: the failed status, or the error's own description.
fn fallback(action: AuthAction, error: &RequestError) -> String {
    if let Some(status) = error.status() {
        return format!("Request failed with status code {status}");
    }

    let description = error.to_string();

    if description.is_empty() {
        action.default_message().to_string()
    } else {
        description
    }
}
