use serde_json::Value;
use thiserror::Error;

use crate::transport::TransportError;

/// Coarse classification of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request never produced an HTTP response.
    Network,
    /// HTTP 401; the session has been cleared.
    Unauthorized,
    /// Any other 4xx rejected by the server.
    Validation,
    /// 5xx or an otherwise unexpected status.
    Server,
    /// A success response whose body could not be decoded.
    Decode,
    /// A local failure around the call (e.g. persisting the session).
    Local,
}

/// Normalised failure handed to UI code: a message and, when the server
/// answered, its status code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    pub status: Option<u16>,
    pub kind: ErrorKind,
}

impl ApiError {
    /// Failure before any response arrived.
    pub fn from_transport(err: TransportError) -> Self {
        Self {
            message: err.to_string(),
            status: None,
            kind: ErrorKind::Network,
        }
    }

    /// Non-success response. Prefers the server's own `message` / `error`
    /// text and falls back to a generic status line.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let message = server_message(body)
            .unwrap_or_else(|| format!("Request failed with status code {status}"));
        let kind = match status {
            401 => ErrorKind::Unauthorized,
            400..=499 => ErrorKind::Validation,
            _ => ErrorKind::Server,
        };
        Self {
            message,
            status: Some(status),
            kind,
        }
    }

    /// Success status, unusable body.
    pub fn decode(status: u16, err: serde_json::Error) -> Self {
        Self {
            message: format!("Invalid response body: {err}"),
            status: Some(status),
            kind: ErrorKind::Decode,
        }
    }

    /// Local failure around a call.
    pub fn local(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            kind: ErrorKind::Local,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ErrorKind::Unauthorized
    }
}

fn server_message(body: &[u8]) -> Option<String> {
    let v: Value = serde_json::from_slice(body).ok()?;
    ["message", "error"]
        .iter()
        .filter_map(|key| v.get(key)?.as_str())
        .find(|s| !s.trim().is_empty())
        .map(str::to_string)
}
