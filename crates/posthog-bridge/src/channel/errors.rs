//! Error types for the method channel.

use std::io;

use thiserror::Error;

/// Reply code for request lines that are not valid method calls.
pub const MALFORMED_CALL_CODE: &str = "MALFORMED_CALL";

/// Reply code for request lines over the size limit.
pub const REQUEST_TOO_LARGE_CODE: &str = "REQUEST_TOO_LARGE";

/// Errors surfaced while reading calls or writing replies.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// Request line could not be parsed as a method call.
    #[error("malformed method call: {message}")]
    MalformedCall {
        /// Parser diagnostic.
        message: String,
        /// Underlying parser error, when there is one.
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Request line exceeds the maximum allowed size.
    #[error("request too large: {size} bytes exceeds {max_size} byte limit")]
    RequestTooLarge {
        /// Bytes received on the line.
        size: usize,
        /// Configured limit.
        max_size: usize,
    },

    /// IO error during read or write.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Reply serialisation failed.
    #[error("failed to serialise reply: {0}")]
    SerializeReply(#[from] serde_json::Error),
}

impl ChannelError {
    /// Creates a malformed call error from a serde error.
    #[must_use]
    pub fn from_json_error(source: serde_json::Error) -> Self {
        Self::MalformedCall {
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Creates a malformed call error with a custom message.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedCall {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a request too large error.
    #[must_use]
    pub const fn request_too_large(size: usize, max_size: usize) -> Self {
        Self::RequestTooLarge { size, max_size }
    }

    /// Reply code for errors the session answers and survives, or `None` when
    /// the channel itself is broken.
    #[must_use]
    pub const fn reply_code(&self) -> Option<&'static str> {
        match self {
            Self::MalformedCall { .. } => Some(MALFORMED_CALL_CODE),
            Self::RequestTooLarge { .. } => Some(REQUEST_TOO_LARGE_CODE),
            Self::Io(_) | Self::SerializeReply(_) => None,
        }
    }
}
