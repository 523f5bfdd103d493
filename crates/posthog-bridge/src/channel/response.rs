//! Reply serialisation for the method channel.

use std::io::Write;

use serde::Serialize;
use serde_json::Value;

use super::errors::ChannelError;
use crate::dispatch::{InvocationResult, MethodError};

/// Reply sent for each method call, one JSON line apiece.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChannelReply {
    /// The command succeeded.
    Success {
        /// Result value; `null` for fire-and-forget commands.
        result: Value,
    },
    /// The command or the request line was rejected.
    Error {
        /// Machine-readable code.
        code: String,
        /// Human-readable message.
        message: String,
        /// Optional structured details.
        details: Option<Value>,
    },
    /// The command name is not supported by this bridge.
    NotImplemented,
}

impl From<MethodError> for ChannelReply {
    fn from(error: MethodError) -> Self {
        Self::Error {
            code: error.code,
            message: error.message,
            details: error.details,
        }
    }
}

impl From<InvocationResult> for ChannelReply {
    fn from(result: InvocationResult) -> Self {
        match result {
            InvocationResult::Success(result) => Self::Success { result },
            InvocationResult::Error(error) => error.into(),
            InvocationResult::NotImplemented => Self::NotImplemented,
        }
    }
}

/// Writer that frames replies as JSON lines.
pub struct ResponseWriter<W> {
    writer: W,
}

impl<W: Write> ResponseWriter<W> {
    /// Creates a new response writer wrapping the given output stream.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes one reply and flushes so the caller sees it immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation, writing or flushing fails.
    pub fn write_reply(&mut self, reply: &ChannelReply) -> Result<(), ChannelError> {
        serde_json::to_writer(&mut self.writer, reply)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }

    /// Writes an error reply for a rejected request line.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_rejection(&mut self, code: &str, error: &ChannelError) -> Result<(), ChannelError> {
        self.write_reply(&ChannelReply::Error {
            code: code.to_owned(),
            message: error.to_string(),
            details: None,
        })
    }
}
