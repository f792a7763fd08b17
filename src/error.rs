//! Various errors module.

use core::fmt;

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Body returned by the backend alongside a non-success status.
#[derive(Deserialize, Debug)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub detail: Option<ErrorDetail>,
}

/// The `detail` field of an error response.
///
/// The backend either sends a plain message (`{"detail": "Email already registered"}`)
/// or, for request validation failures, a list of field errors
/// (`{"detail": [{"loc": ["body", "password"], "msg": "...", "type": "value_error"}]}`).
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum ErrorDetail {
    /// A single human readable message.
    Message(String),
    /// A list of field-level validation errors.
    Fields(Vec<FieldError>),
}

impl ErrorDetail {
    /// Returns the detail as a plain message, if it is one.
    #[must_use]
    pub fn as_message(&self) -> Option<&str> {
        match self {
            Self::Message(message) => Some(message),
            Self::Fields(_) => None,
        }
    }

    /// Returns the field errors, if the detail is a validation list.
    #[must_use]
    pub fn as_fields(&self) -> Option<&[FieldError]> {
        match self {
            Self::Message(_) => None,
            Self::Fields(fields) => Some(fields),
        }
    }
}

/// One entry of a validation error list.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldError {
    /// Location of the offending value *(example: `["body", "password"]`)*.
    #[serde(default)]
    pub loc: Vec<serde_json::Value>,
    /// Readable explanation of what is wrong with the value.
    #[serde(default)]
    pub msg: Option<String>,
    /// Error type *(example: `value_error`)*.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let location = self
            .loc
            .iter()
            .map(|part| match part {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(".");

        write!(f, "{location}: {}", self.msg.as_deref().unwrap_or("invalid value"))
    }
}

/// Represents errors when interacting with the movie catalog API.
///
/// Every non-success response is classified by status code, carrying the decoded
/// `detail` body when the backend sent one.
#[derive(Error, Debug)]
pub enum RequestError {
    /// The API returned a [400 Bad Request]("https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/400") HTTP error response.
    ///
    /// Usually a conflict such as an already registered email.
    #[error("Bad Request: the server rejected the request (status code 400).")]
    BadRequest(Option<ErrorDetail>),
    /// The API returned a [401 Unauthorized]("https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/401") HTTP error response.
    ///
    /// Either the credentials are wrong or the session token expired.
    #[error("Unauthorized: the request requires a valid session (status code 401).")]
    Unauthorized(Option<ErrorDetail>),
    /// The API returned a [403 Forbidden]("https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/403") HTTP error response.
    #[error("Forbidden: the session is not allowed to perform this request (status code 403).")]
    Forbidden(Option<ErrorDetail>),
    /// The API returned a [404 Not Found]("https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/404") HTTP error response.
    #[error("Not Found: the requested resource could not be found (status code 404).")]
    NotFound(Option<ErrorDetail>),
    /// The API returned a [422 Unprocessable Content]("https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/422") HTTP error response.
    ///
    /// The detail is normally a list of [`FieldError`]s.
    #[error("Validation Error: the request payload was rejected (status code 422).")]
    Validation(Option<ErrorDetail>),
    /// Too many requests were sent to the API.
    ///
    /// The server is rate limiting requests. Wait before retrying.
    #[error("Too Many Requests: the server is rate limiting requests (status code 429).")]
    TooManyRequests(Option<ErrorDetail>),
    /// The API returned a [500 Internal Server Error]("https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/500") HTTP error response.
    #[error("Server Error: the server failed to process the request (status code 500).")]
    ServerError(Option<ErrorDetail>),
    /// Any other non-success status code.
    #[error("Request failed with status code {status}")]
    UnexpectedResponse {
        /// The HTTP status code.
        status: u16,
        /// Decoded error body, if any.
        detail: Option<ErrorDetail>,
    },
    /// The response could not be parsed into the expected data structure.
    #[error("Parse Error: could not parse the response into the expected data structure: {0}")]
    ParseError(String),
    /// Communication with the API failed before any response was received.
    #[error("{0}")]
    Unreachable(String),
    /// The request was not sent because one of its arguments is invalid.
    #[error("Invalid Input: {0}")]
    InvalidInput(String),
}

impl RequestError {
    /// Classifies a non-success status into the matching variant.
    pub(crate) fn from_status(status: StatusCode, detail: Option<ErrorDetail>) -> Self {
        match status {
            StatusCode::BAD_REQUEST => Self::BadRequest(detail),
            StatusCode::UNAUTHORIZED => Self::Unauthorized(detail),
            StatusCode::FORBIDDEN => Self::Forbidden(detail),
            StatusCode::NOT_FOUND => Self::NotFound(detail),
            StatusCode::UNPROCESSABLE_ENTITY => Self::Validation(detail),
            StatusCode::TOO_MANY_REQUESTS => Self::TooManyRequests(detail),
            StatusCode::INTERNAL_SERVER_ERROR => Self::ServerError(detail),
            _ => Self::UnexpectedResponse {
                status: status.as_u16(),
                detail,
            },
        }
    }

    /// Classifies a failure that happened before a response was received.
    pub(crate) fn from_transport(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Unreachable("Request timed out".to_string())
        } else if error.is_connect() {
            Self::Unreachable("Failed to connect to server".to_string())
        } else {
            Self::Unreachable(error.to_string())
        }
    }

    /// HTTP status code of the response that caused this error, if there was one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::BadRequest(_) => Some(400),
            Self::Unauthorized(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::Validation(_) => Some(422),
            Self::TooManyRequests(_) => Some(429),
            Self::ServerError(_) => Some(500),
            Self::UnexpectedResponse { status, .. } => Some(*status),
            Self::ParseError(_) | Self::Unreachable(_) | Self::InvalidInput(_) => None,
        }
    }

    /// The decoded `detail` of the error body, if the backend sent one.
    #[must_use]
    pub const fn detail(&self) -> Option<&ErrorDetail> {
        match self {
            Self::BadRequest(detail)
            | Self::Unauthorized(detail)
            | Self::Forbidden(detail)
            | Self::NotFound(detail)
            | Self::Validation(detail)
            | Self::TooManyRequests(detail)
            | Self::ServerError(detail)
            | Self::UnexpectedResponse { detail, .. } => detail.as_ref(),
            Self::ParseError(_) | Self::Unreachable(_) | Self::InvalidInput(_) => None,
        }
    }

    /// Shortcut for the detail when it is a plain message.
    #[must_use]
    pub fn detail_message(&self) -> Option<&str> {
        self.detail().and_then(ErrorDetail::as_message)
    }
}

/// Errors raised while building an [`ApiClient`](crate::ApiClient).
#[derive(Error, Debug)]
pub enum BuildError {
    /// The base URL doesn't use the `http` or `https` scheme.
    #[error("Invalid base_url `{0}`: must start with http:// or https://")]
    InvalidBaseUrl(String),
    /// The underlying HTTP client couldn't be created.
    #[error("Failed to create HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Errors raised by a [`TokenStorage`](crate::TokenStorage) implementation.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Reading or writing the token slot failed.
    #[error("Token storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// No location is available to persist the token.
    #[error("No location available to persist the session token.")]
    Unavailable,
}

/// Errors raised while loading a [`ClientConfig`](crate::ClientConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An environment variable holds a value that isn't valid unicode.
    #[error("Environment variable `{0}` is not valid unicode.")]
    NotUnicode(&'static str),
    /// The client couldn't be built from the loaded configuration.
    #[error(transparent)]
    Build(#[from] BuildError),
    /// The token storage location couldn't be determined.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_decodes_plain_message() {
        let body: ErrorBody = serde_json::from_str(r#"{"detail": "Movie not found"}"#).unwrap();

        assert_eq!(
            body.detail,
            Some(ErrorDetail::Message("Movie not found".to_string()))
        );
    }

    #[test]
    fn detail_decodes_validation_list() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"detail": [{"loc": ["body", "password"], "msg": "Value error, too short", "type": "value_error"}]}"#,
        )
        .unwrap();

        let fields = body.detail.as_ref().and_then(ErrorDetail::as_fields).unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].msg.as_deref(), Some("Value error, too short"));
        assert_eq!(fields[0].kind.as_deref(), Some("value_error"));
        assert_eq!(fields[0].to_string(), "body.password: Value error, too short");
    }

    #[test]
    fn missing_detail_is_none() {
        let body: ErrorBody = serde_json::from_str(r#"{"message": "nope"}"#).unwrap();

        assert!(body.detail.is_none());
    }

    #[test]
    fn status_classification() {
        let error = RequestError::from_status(StatusCode::UNPROCESSABLE_ENTITY, None);
        assert!(matches!(error, RequestError::Validation(None)));
        assert_eq!(error.status(), Some(422));

        let error = RequestError::from_status(
            StatusCode::BAD_GATEWAY,
            Some(ErrorDetail::Message("upstream".to_string())),
        );
        assert_eq!(error.status(), Some(502));
        assert_eq!(error.detail_message(), Some("upstream"));
        assert_eq!(error.to_string(), "Request failed with status code 502");
    }
}
