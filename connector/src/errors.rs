//! Error types for the ASF IPC connector
//!
//! Every failure surfaced by the transport is a [`ConnectorError`] tagged with an
//! [`ErrorKind`]. Kinds form a closed hierarchy so callers can match as coarsely
//! or as finely as they need:
//!
//! ```text
//! Connector
//! └── Ipc
//!     ├── Network
//!     └── Http
//!         ├── BadRequest (400)      ├── MethodNotAllowed (405)
//!         ├── Unauthorized (401)    ├── NotAcceptable (406)
//!         ├── Forbidden (403)       ├── LengthRequired (411)
//!         └── NotFound (404)        └── NotImplemented (501)
//! ```
//!
//! `InvalidArgument` is not part of the tree. It marks a malformed call that was
//! rejected before any network I/O.

use serde_json::{json, Map, Value};
use std::fmt;
use thiserror::Error;

use crate::config::ConfigError;

pub type Result<T> = std::result::Result<T, ConnectorError>;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Closed set of failure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Root of the taxonomy
    Connector,
    /// Any failure while talking to ASF IPC
    Ipc,
    /// Transport-level failure with no HTTP response
    Network,
    /// Non-2xx HTTP response without a dedicated kind
    Http,
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    MethodNotAllowed,
    NotAcceptable,
    LengthRequired,
    NotImplemented,
    /// Caller passed a query or body that is not a key-value mapping
    InvalidArgument,
}

/// Status codes with a dedicated kind. Anything else non-2xx maps to [`ErrorKind::Http`].
pub const HTTP_STATUS_KINDS: [(u16, ErrorKind); 8] = [
    (400, ErrorKind::BadRequest),
    (401, ErrorKind::Unauthorized),
    (403, ErrorKind::Forbidden),
    (404, ErrorKind::NotFound),
    (405, ErrorKind::MethodNotAllowed),
    (406, ErrorKind::NotAcceptable),
    (411, ErrorKind::LengthRequired),
    (501, ErrorKind::NotImplemented),
];

impl ErrorKind {
    /// Kind for a non-2xx HTTP status.
    pub fn from_status(status: u16) -> Self {
        HTTP_STATUS_KINDS
            .iter()
            .find(|(code, _)| *code == status)
            .map(|(_, kind)| *kind)
            .unwrap_or(ErrorKind::Http)
    }

    pub fn parent(self) -> Option<ErrorKind> {
        match self {
            ErrorKind::Connector | ErrorKind::InvalidArgument => None,
            ErrorKind::Ipc => Some(ErrorKind::Connector),
            ErrorKind::Network | ErrorKind::Http => Some(ErrorKind::Ipc),
            ErrorKind::BadRequest
            | ErrorKind::Unauthorized
            | ErrorKind::Forbidden
            | ErrorKind::NotFound
            | ErrorKind::MethodNotAllowed
            | ErrorKind::NotAcceptable
            | ErrorKind::LengthRequired
            | ErrorKind::NotImplemented => Some(ErrorKind::Http),
        }
    }

    /// True when `self` is `ancestor` or descends from it.
    pub fn is_a(self, ancestor: ErrorKind) -> bool {
        let mut current = Some(self);
        while let Some(kind) = current {
            if kind == ancestor {
                return true;
            }
            current = kind.parent();
        }
        false
    }

    pub fn default_message(self) -> &'static str {
        match self {
            ErrorKind::Connector => "ASFConnector encountered an error",
            ErrorKind::Ipc => "ASF IPC communication error",
            ErrorKind::Network => "Network error while communicating with ASF IPC",
            ErrorKind::Http => "ASF IPC HTTP error",
            ErrorKind::BadRequest => "Bad request",
            ErrorKind::Unauthorized => "Unauthorized request",
            ErrorKind::Forbidden => "Forbidden request",
            ErrorKind::NotFound => "Requested resource not found",
            ErrorKind::MethodNotAllowed => "Method not allowed",
            ErrorKind::NotAcceptable => "Requested format not acceptable",
            ErrorKind::LengthRequired => "Content-Length header required",
            ErrorKind::NotImplemented => "Requested functionality not implemented",
            ErrorKind::InvalidArgument => "Invalid argument",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::Connector => "ConnectorError",
            ErrorKind::Ipc => "IpcError",
            ErrorKind::Network => "NetworkError",
            ErrorKind::Http => "HttpError",
            ErrorKind::BadRequest => "BadRequest",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::Forbidden => "Forbidden",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::MethodNotAllowed => "MethodNotAllowed",
            ErrorKind::NotAcceptable => "NotAcceptable",
            ErrorKind::LengthRequired => "LengthRequired",
            ErrorKind::NotImplemented => "NotImplemented",
            ErrorKind::InvalidArgument => "InvalidArgument",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error raised by every connector call.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ConnectorError {
    kind: ErrorKind,
    message: String,
    status_code: Option<u16>,
    payload: Option<Value>,
    #[source]
    source: Option<BoxError>,
}

impl ConnectorError {
    /// Error of `kind` with its default message.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: kind.default_message().to_string(),
            status_code: None,
            payload: None,
            source: None,
        }
    }

    /// Error of `kind` with `message`, or the kind's default when `message` is blank.
    pub fn with_message(kind: ErrorKind, message: impl Into<String>) -> Self {
        let message = message.into();
        let mut err = Self::new(kind);
        if !message.is_empty() {
            err.message = message;
        }
        err
    }

    /// Error for a non-2xx response: kind picked from the status table.
    pub fn http(status: u16, message: impl Into<String>, payload: Option<Value>) -> Self {
        let mut err = Self::with_message(ErrorKind::from_status(status), message);
        err.status_code = Some(status);
        err.payload = payload;
        err
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::with_message(ErrorKind::Network, message)
    }

    pub fn ipc(message: impl Into<String>) -> Self {
        Self::with_message(ErrorKind::Ipc, message)
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::with_message(ErrorKind::InvalidArgument, message)
    }

    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    /// Decoded remote error body, if the server sent JSON.
    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    pub fn is_a(&self, ancestor: ErrorKind) -> bool {
        self.kind.is_a(ancestor)
    }

    pub fn is_ipc(&self) -> bool {
        self.is_a(ErrorKind::Ipc)
    }

    pub fn is_http(&self) -> bool {
        self.is_a(ErrorKind::Http)
    }

    pub fn is_network(&self) -> bool {
        self.kind == ErrorKind::Network
    }

    /// ASF-shaped failure object for callers that prefer data over `Err`.
    pub fn to_payload(&self) -> Value {
        let mut body = Map::new();
        body.insert("Success".to_string(), Value::Bool(false));
        body.insert("Message".to_string(), Value::String(self.message.clone()));
        if let Some(status) = self.status_code {
            body.insert("StatusCode".to_string(), json!(status));
        }
        body.insert("ExceptionType".to_string(), json!(self.kind.name()));
        if let Some(payload) = &self.payload {
            body.insert("ResponsePayload".to_string(), payload.clone());
        }
        Value::Object(body)
    }
}

impl From<ConfigError> for ConnectorError {
    fn from(err: ConfigError) -> Self {
        ConnectorError::invalid_argument(err.to_string()).with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: [ErrorKind; 13] = [
        ErrorKind::Connector,
        ErrorKind::Ipc,
        ErrorKind::Network,
        ErrorKind::Http,
        ErrorKind::BadRequest,
        ErrorKind::Unauthorized,
        ErrorKind::Forbidden,
        ErrorKind::NotFound,
        ErrorKind::MethodNotAllowed,
        ErrorKind::NotAcceptable,
        ErrorKind::LengthRequired,
        ErrorKind::NotImplemented,
        ErrorKind::InvalidArgument,
    ];

    #[test]
    fn test_default_messages_set() {
        for kind in ALL_KINDS {
            let err = ConnectorError::new(kind);
            assert!(!err.to_string().is_empty());
            assert_eq!(err.to_string(), kind.default_message());
        }
    }

    #[test]
    fn test_blank_message_falls_back_to_default() {
        let err = ConnectorError::with_message(ErrorKind::NotFound, "");
        assert_eq!(err.message(), "Requested resource not found");
    }

    #[test]
    fn test_hierarchy() {
        assert!(ErrorKind::Ipc.is_a(ErrorKind::Connector));
        assert!(ErrorKind::Network.is_a(ErrorKind::Ipc));
        assert!(ErrorKind::Network.is_a(ErrorKind::Connector));
        assert!(!ErrorKind::Network.is_a(ErrorKind::Http));
        for (_, kind) in HTTP_STATUS_KINDS {
            assert!(kind.is_a(ErrorKind::Http));
            assert!(kind.is_a(ErrorKind::Ipc));
            assert!(kind.is_a(ErrorKind::Connector));
        }
        assert!(!ErrorKind::Http.is_a(ErrorKind::NotFound));
    }

    #[test]
    fn test_invalid_argument_outside_taxonomy() {
        assert!(!ErrorKind::InvalidArgument.is_a(ErrorKind::Connector));
        assert!(!ConnectorError::invalid_argument("bad").is_ipc());
    }

    #[test]
    fn test_status_table() {
        assert_eq!(ErrorKind::from_status(400), ErrorKind::BadRequest);
        assert_eq!(ErrorKind::from_status(411), ErrorKind::LengthRequired);
        assert_eq!(ErrorKind::from_status(501), ErrorKind::NotImplemented);
        assert_eq!(ErrorKind::from_status(500), ErrorKind::Http);
        assert_eq!(ErrorKind::from_status(418), ErrorKind::Http);
    }

    #[test]
    fn test_http_error_carries_status_and_payload() {
        let payload = json!({"error": "details", "code": 123});
        let err = ConnectorError::http(400, "nope", Some(payload.clone()));
        assert_eq!(err.kind(), ErrorKind::BadRequest);
        assert_eq!(err.status_code(), Some(400));
        assert_eq!(err.payload(), Some(&payload));
    }

    #[test]
    fn test_source_is_chained() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = ConnectorError::network("refused").with_source(io);
        let source = std::error::Error::source(&err).expect("source kept");
        assert_eq!(source.to_string(), "refused");
    }

    #[test]
    fn test_to_payload_shape() {
        let err = ConnectorError::http(404, "Resource not found", Some(json!({"Message": "Resource not found"})));
        let payload = err.to_payload();
        assert_eq!(payload["Success"], false);
        assert_eq!(payload["Message"], "Resource not found");
        assert_eq!(payload["StatusCode"], 404);
        assert_eq!(payload["ExceptionType"], "NotFound");
        assert_eq!(payload["ResponsePayload"]["Message"], "Resource not found");

        let network = ConnectorError::network("Network unreachable").to_payload();
        assert_eq!(network["ExceptionType"], "NetworkError");
        assert!(network.get("StatusCode").is_none());
    }
}
