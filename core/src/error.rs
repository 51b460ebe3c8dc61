//! Error types for the simple client.
//!
//! # Design
//! Every failure a call can hit maps to one variant, so the synchronous
//! `get`/`post` entry points can hand callers a `Result` that still tells a
//! transport failure apart from a non-2xx status or a body that did not match
//! the requested shape. The `_or_none` variants on `SimpleClient` collapse all
//! of these into `None`.

use thiserror::Error;

const NO_AUTH_MESSAGE: &str = "Api Key is not valid";
const NO_AUTH_MESSAGE_TR: &str = "Api anahatrı geçersiz.";

/// Errors produced while building, sending, or decoding a request.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection, DNS, timeout or I/O failure below HTTP.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The server answered with a status outside 2xx.
    #[error("Response Failed Cause -> code : {code} message : {message}")]
    Response { code: u16, message: String },

    /// The response body could not be decoded into the requested shape.
    #[error("decoding failed: {0}")]
    Decode(String),

    /// The request body could not be encoded as JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The target URL is not an absolute, well-formed URL.
    #[error("invalid url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    /// Invalid credentials. Reserved for callers; the client never raises it.
    #[error("{}", NO_AUTH_MESSAGE)]
    NoAuth,
}

impl ClientError {
    /// HTTP status code carried by a `Response` error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::Response { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Turkish rendering of the message. Only `NoAuth` has a translation;
    /// every other variant falls back to its `Display` text.
    pub fn localized_message(&self) -> String {
        match self {
            ClientError::NoAuth => NO_AUTH_MESSAGE_TR.to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
