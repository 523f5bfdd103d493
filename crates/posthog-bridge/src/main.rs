//! `posthog-bridge` binary: serves the method channel over stdin and stdout.

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use posthog_bridge::{
    LoggingAnalyticsClient, StructuredHealthReporter, SystemConfigLoader, bootstrap_with,
};

const MAIN_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::main");

fn main() -> ExitCode {
    let bridge = match bootstrap_with(
        &SystemConfigLoader,
        Arc::new(StructuredHealthReporter::new()),
        Arc::new(LoggingAnalyticsClient::new()),
    ) {
        Ok(bridge) => bridge,
        Err(error) => {
            // Telemetry may not be installed yet, so report on stderr directly.
            writeln!(io::stderr(), "posthog-bridge: {error}").ok();
            return ExitCode::FAILURE;
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    match bridge.session().serve(stdin.lock(), stdout.lock()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(target: MAIN_TARGET, %error, "channel failed");
            ExitCode::FAILURE
        }
    }
}
