//! Error types for command dispatch failures.
//!
//! A dispatch error always becomes a [`MethodError`] reply. Malformed
//! invocations share one fixed wire message; the offending key is kept on the
//! error for logging only.

use thiserror::Error;

use super::outcome::MethodError;
use crate::client::ClientError;

/// Code carried by every malformed-invocation reply.
pub const BAD_ARGS_CODE: &str = "BAD_ARGS";

/// Code carried by replies for failures reported by the analytics client.
pub const CLIENT_ERROR_CODE: &str = "CLIENT_ERROR";

/// Human-readable message for malformed invocations.
pub const BAD_ARGUMENTS_MESSAGE: &str = "Bad or missing arguments";

/// Errors surfaced while running a command.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The argument bag is missing, is not an object, or a required key is
    /// missing or mistyped.
    #[error("Bad or missing arguments")]
    BadArguments {
        /// What failed validation.
        reason: String,
    },

    /// The analytics client rejected the operation.
    #[error(transparent)]
    Client(#[from] ClientError),
}

impl DispatchError {
    /// Creates a bad arguments error.
    #[must_use]
    pub fn bad_arguments(reason: impl Into<String>) -> Self {
        Self::BadArguments {
            reason: reason.into(),
        }
    }

    /// Machine-readable code for the reply.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::BadArguments { .. } => BAD_ARGS_CODE,
            Self::Client(_) => CLIENT_ERROR_CODE,
        }
    }

    /// Converts the error into the reply sent across the boundary.
    #[must_use]
    pub fn into_method_error(self) -> MethodError {
        let message = match &self {
            Self::BadArguments { .. } => BAD_ARGUMENTS_MESSAGE.to_owned(),
            Self::Client(error) => error.message().to_owned(),
        };
        MethodError::new(self.code(), message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_arguments_hide_reason_from_reply() {
        let error = DispatchError::bad_arguments("missing key 'apiKey'");
        assert_eq!(error.to_string(), BAD_ARGUMENTS_MESSAGE);

        let reply = error.into_method_error();
        assert_eq!(reply.code, BAD_ARGS_CODE);
        assert_eq!(reply.message, BAD_ARGUMENTS_MESSAGE);
        assert!(reply.details.is_none());
    }

    #[test]
    fn client_errors_keep_client_message() {
        let error = DispatchError::from(ClientError::new("storage unavailable"));
        assert_eq!(error.code(), CLIENT_ERROR_CODE);

        let reply = error.into_method_error();
        assert_eq!(reply.code, CLIENT_ERROR_CODE);
        assert_eq!(reply.message, "storage unavailable");
    }
}
