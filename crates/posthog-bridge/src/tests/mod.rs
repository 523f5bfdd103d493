//! Test suites for the bridge.

mod support;
