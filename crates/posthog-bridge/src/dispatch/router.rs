//! Command routing.
//!
//! The dispatcher maps a command name to its table entry and runs it against
//! the injected client. It keeps no state between invocations, so a single
//! dispatcher can be shared by any number of callers.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use super::command::lookup;
use super::errors::DispatchError;
use super::outcome::InvocationResult;
use crate::client::AnalyticsClient;

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// Routes named invocations to the analytics client.
#[derive(Clone)]
pub struct Dispatcher {
    client: Arc<dyn AnalyticsClient>,
}

impl Dispatcher {
    /// Creates a dispatcher bound to a client.
    #[must_use]
    pub const fn new(client: Arc<dyn AnalyticsClient>) -> Self {
        Self { client }
    }

    /// Runs one invocation to completion.
    ///
    /// Unknown command names yield [`InvocationResult::NotImplemented`];
    /// malformed arguments yield a `BAD_ARGS` error without touching the
    /// client.
    #[must_use]
    pub fn invoke(&self, method: &str, arguments: Option<Value>) -> InvocationResult {
        let Some(spec) = lookup(method) else {
            debug!(target: DISPATCH_TARGET, method, "unknown command");
            return InvocationResult::NotImplemented;
        };

        debug!(
            target: DISPATCH_TARGET,
            command = spec.name(),
            operation = spec.operation,
            "dispatching command"
        );

        match spec.execute(self.client.as_ref(), arguments) {
            Ok(value) => InvocationResult::Success(value),
            Err(error) => {
                log_failure(spec.name(), &error);
                InvocationResult::Error(error.into_method_error())
            }
        }
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}

fn log_failure(command: &str, error: &DispatchError) {
    match error {
        DispatchError::BadArguments { reason } => {
            debug!(target: DISPATCH_TARGET, command, reason = %reason, "rejected arguments");
        }
        DispatchError::Client(source) => {
            warn!(target: DISPATCH_TARGET, command, error = %source, "client operation failed");
        }
    }
}
