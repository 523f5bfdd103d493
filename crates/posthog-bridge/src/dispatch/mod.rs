//! Named command dispatch.
//!
//! The application layer invokes commands by name with a loosely-typed
//! argument object. This module validates the arguments against a fixed
//! table, translates them into typed calls on the [`AnalyticsClient`], and
//! reports one [`InvocationResult`] per call.
//!
//! ## Outcomes
//!
//! - `Success(value)`: the client call ran; fire-and-forget commands return
//!   `null`.
//! - `Error { code: "BAD_ARGS" }`: the argument object is missing, not an
//!   object, or a required key is missing or mistyped. Nothing reaches the
//!   client.
//! - `Error { code: "CLIENT_ERROR" }`: the client reported a failure.
//! - `NotImplemented`: the command name is unknown. Callers treat this as an
//!   unsupported feature, not a fault.
//!
//! [`AnalyticsClient`]: crate::client::AnalyticsClient

mod arguments;
mod command;
mod errors;
mod handlers;
mod outcome;
mod router;

pub use self::arguments::{ArgumentBag, ArgumentKind, ArgumentSpec};
pub use self::command::{COMMAND_TABLE, Command, CommandSpec, lookup};
pub use self::errors::{BAD_ARGS_CODE, BAD_ARGUMENTS_MESSAGE, CLIENT_ERROR_CODE, DispatchError};
pub use self::outcome::{InvocationResult, MethodError};
pub use self::router::Dispatcher;
