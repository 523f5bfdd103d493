//! Results returned across the boundary for each invocation.

use serde::Serialize;
use serde_json::Value;

/// Structured failure reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodError {
    /// Short machine-readable code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Optional structured details. The dispatcher never populates this.
    pub details: Option<Value>,
}

impl MethodError {
    /// Creates an error without details.
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }
}

/// Outcome of one invocation. Exactly one per call, never partial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationResult {
    /// The command ran. Fire-and-forget commands succeed with `null`.
    Success(Value),
    /// The command was rejected or the client failed.
    Error(MethodError),
    /// The command name is unknown to this bridge. A capability signal, not a
    /// failure.
    NotImplemented,
}

impl InvocationResult {
    /// Returns the success payload, if any.
    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        match self {
            Self::Success(value) => Some(value),
            Self::Error(_) | Self::NotImplemented => None,
        }
    }

    /// Returns the error code, if the invocation failed.
    #[must_use]
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::Error(error) => Some(error.code.as_str()),
            Self::Success(_) | Self::NotImplemented => None,
        }
    }

    /// Returns true when the command name was not recognised.
    #[must_use]
    pub const fn is_not_implemented(&self) -> bool {
        matches!(self, Self::NotImplemented)
    }
}
