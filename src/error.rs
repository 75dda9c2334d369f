//! Error types for the Septotrip API client.
//!
//! Failures fall in three groups: statuses the client recognizes, which
//! become a flat [`ApiError`] (`name`, `code`, `message`); payloads that do
//! not have the expected shape ([`Error::Decode`]); and everything else,
//! which is passed through as-is ([`Error::Http`], [`Error::Status`]).

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A specialized `Result` type for Septotrip operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for all Septotrip API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Transport failure (DNS, connection, timeout, aborted body).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The server answered with a status the call site recognizes.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The server answered with a non-2xx status nobody mapped.
    #[error("HTTP status {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Error name reported by the server, if any
        name: Option<String>,
        /// Server-provided message, or a placeholder
        message: String,
        /// Raw response body for debugging
        body: Value,
    },

    /// A 2xx payload did not match the expected output shape.
    #[error("Unexpected payload for {expected}: {source}")]
    Decode {
        /// Name of the type the payload was checked against
        expected: &'static str,
        /// The payload as received
        payload: Value,
        /// Why the structural check failed
        #[source]
        source: serde_json::Error,
    },

    /// A form field could not be turned into a multipart part.
    #[error("Multipart encoding failed: {0}")]
    Encode(String),

    /// Reading a local file for upload failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input provided to a function
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// [`crate::client()`] was called before [`crate::init`].
    #[error("Septotrip client used before initialization")]
    NotInitialized,

    /// The caller's token store failed to produce or persist a token.
    #[error("Token store error: {0}")]
    TokenStore(String),
}

impl Error {
    /// Returns `true` for invalid-token (401) and forbidden (403) errors.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Error::Api(ApiError {
                kind: ErrorKind::InvalidToken | ErrorKind::Unauthorized,
                ..
            })
        )
    }

    /// Returns `true` if this error indicates a client-side issue
    /// (invalid input, bad request, etc.).
    pub fn is_client_error(&self) -> bool {
        match self.status() {
            Some(status) => (400..500).contains(&status),
            None => matches!(
                self,
                Error::InvalidInput(_) | Error::Encode(_) | Error::Config(_)
            ),
        }
    }

    /// Returns `true` if this error indicates a server-side issue.
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|status| status >= 500)
    }

    /// The HTTP status behind this error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(api) => Some(api.code),
            Error::Status { status, .. } => Some(*status),
            Error::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The typed error, if this is a recognized status.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(api) => Some(api),
            _ => None,
        }
    }

    /// Build the error for a non-2xx response.
    ///
    /// 401 and 403 are recognized for every endpoint; every other status is
    /// left for the call site's [`StatusMap`].
    pub(crate) fn from_status(status: u16, body: Value) -> Self {
        let message = body
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("Unknown API error")
            .to_string();

        match status {
            401 => ApiError::new(ErrorKind::InvalidToken, status, message).into(),
            403 => ApiError::new(ErrorKind::Unauthorized, status, message).into(),
            _ => {
                let name = body
                    .get("name")
                    .and_then(|n| n.as_str())
                    .map(String::from);
                Error::Status {
                    status,
                    name,
                    message,
                    body,
                }
            }
        }
    }
}

/// Discriminant of a recognized HTTP failure.
///
/// Serialized with the names the Septotrip server itself uses in error
/// bodies (`"InvalidTokenError"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// 401: the bearer token is missing, expired or forged.
    #[serde(rename = "InvalidTokenError")]
    InvalidToken,
    /// 403: the token is valid but not allowed to touch the resource.
    #[serde(rename = "UnauthorizedError")]
    Unauthorized,
    /// 400 on a call that carries a request body.
    #[serde(rename = "InvalidBodyError")]
    InvalidBody,
    /// 400 on a body-less call keyed by an identifier.
    #[serde(rename = "NoIdProvidedError")]
    NoIdProvided,
    /// 400 at login when the password does not match.
    #[serde(rename = "InvalidPasswordError")]
    InvalidPassword,
    /// 404
    #[serde(rename = "InexistantResourceError")]
    InexistantResource,
    /// 409 at registration.
    #[serde(rename = "ResourceAlreadyExistError")]
    ResourceAlreadyExist,
}

impl ErrorKind {
    /// The wire name of this error kind.
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::InvalidToken => "InvalidTokenError",
            ErrorKind::Unauthorized => "UnauthorizedError",
            ErrorKind::InvalidBody => "InvalidBodyError",
            ErrorKind::NoIdProvided => "NoIdProvidedError",
            ErrorKind::InvalidPassword => "InvalidPasswordError",
            ErrorKind::InexistantResource => "InexistantResourceError",
            ErrorKind::ResourceAlreadyExist => "ResourceAlreadyExistError",
        }
    }

    /// Look up a kind by the name a server error body reports.
    pub fn from_name(name: &str) -> Option<Self> {
        [
            ErrorKind::InvalidToken,
            ErrorKind::Unauthorized,
            ErrorKind::InvalidBody,
            ErrorKind::NoIdProvided,
            ErrorKind::InvalidPassword,
            ErrorKind::InexistantResource,
            ErrorKind::ResourceAlreadyExist,
        ]
        .into_iter()
        .find(|kind| kind.name() == name)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A recognized HTTP failure: `{ name, code, message }`.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{kind} ({code}): {message}")]
pub struct ApiError {
    /// Which failure this is
    #[serde(rename = "name")]
    pub kind: ErrorKind,
    /// HTTP status code
    pub code: u16,
    /// Server-provided message
    pub message: String,
}

impl ApiError {
    /// Create a typed error.
    pub fn new(kind: ErrorKind, code: u16, message: impl Into<String>) -> Self {
        Self {
            kind,
            code,
            message: message.into(),
        }
    }

    /// The wire name, e.g. `"InexistantResourceError"`.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

/// One entry of a [`StatusMap`].
#[derive(Debug, Clone, Copy)]
pub enum StatusRule {
    /// This status always maps to this kind.
    Fixed(u16, ErrorKind),
    /// This status maps to whichever of these kinds the server names in
    /// its error body; unnamed or unlisted errors stay unmapped.
    Named(u16, &'static [ErrorKind]),
}

/// Which statuses an endpoint recognizes, beyond the universal 401/403.
///
/// ```
/// use septotrip::{ErrorKind, StatusMap, StatusRule};
///
/// const DELETE_TRIP: StatusMap = StatusMap::new(&[
///     StatusRule::Fixed(400, ErrorKind::NoIdProvided),
///     StatusRule::Fixed(404, ErrorKind::InexistantResource),
/// ]);
/// assert_eq!(DELETE_TRIP.resolve(404, None), Some(ErrorKind::InexistantResource));
/// assert_eq!(DELETE_TRIP.resolve(500, None), None);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StatusMap {
    rules: &'static [StatusRule],
}

impl StatusMap {
    /// Recognizes nothing beyond 401/403.
    pub const NONE: StatusMap = StatusMap::new(&[]);

    /// Body-less call keyed by an identifier (GET or DELETE by id).
    pub const LOOKUP: StatusMap = StatusMap::new(&[
        StatusRule::Fixed(400, ErrorKind::NoIdProvided),
        StatusRule::Fixed(404, ErrorKind::InexistantResource),
    ]);

    /// Call carrying a body, with no parent resource in the path.
    pub const CREATE: StatusMap = StatusMap::new(&[StatusRule::Fixed(400, ErrorKind::InvalidBody)]);

    /// Call carrying a body against an identified resource.
    pub const WRITE: StatusMap = StatusMap::new(&[
        StatusRule::Fixed(400, ErrorKind::InvalidBody),
        StatusRule::Fixed(404, ErrorKind::InexistantResource),
    ]);

    /// Account registration.
    pub const REGISTER: StatusMap = StatusMap::new(&[
        StatusRule::Fixed(400, ErrorKind::InvalidBody),
        StatusRule::Fixed(409, ErrorKind::ResourceAlreadyExist),
    ]);

    /// Login: the server tells a malformed body and a wrong password apart.
    pub const LOGIN: StatusMap = StatusMap::new(&[
        StatusRule::Named(400, &[ErrorKind::InvalidBody, ErrorKind::InvalidPassword]),
        StatusRule::Fixed(404, ErrorKind::InexistantResource),
    ]);

    /// Build a map from its rules. First matching rule wins.
    pub const fn new(rules: &'static [StatusRule]) -> Self {
        Self { rules }
    }

    /// The kind `status` maps to, if any.
    pub fn resolve(&self, status: u16, server_name: Option<&str>) -> Option<ErrorKind> {
        self.rules.iter().find_map(|rule| match *rule {
            StatusRule::Fixed(code, kind) if code == status => Some(kind),
            StatusRule::Named(code, kinds) if code == status => {
                let named = ErrorKind::from_name(server_name?)?;
                kinds.contains(&named).then_some(named)
            }
            _ => None,
        })
    }

    /// Turn an unmapped status error into a typed one when this map
    /// recognizes it. Any other error is returned untouched.
    pub fn apply(&self, err: Error) -> Error {
        match err {
            Error::Status {
                status,
                name,
                message,
                body,
            } => match self.resolve(status, name.as_deref()) {
                Some(kind) => ApiError::new(kind, status, message).into(),
                None => Error::Status {
                    status,
                    name,
                    message,
                    body,
                },
            },
            other => other,
        }
    }
}
