//! Scenario world for the channel behaviour suite.

use std::cell::RefCell;
use std::sync::Arc;

use serde_json::Value;

use super::{RecordingClient, RecordingHealthReporter, TestConfigLoader};
use crate::bootstrap::{Bridge, bootstrap_with};
use crate::resolver::StartupOutcome;

/// Builds a fresh scenario world.
pub fn world() -> RefCell<BridgeWorld> {
    RefCell::new(BridgeWorld::new())
}

/// State shared across BDD steps: a bridge over a recording client plus the
/// request lines sent to it and the replies it wrote.
pub struct BridgeWorld {
    loader: TestConfigLoader,
    pub client: Arc<RecordingClient>,
    pub reporter: Arc<RecordingHealthReporter>,
    bridge: Option<Bridge>,
    input: Vec<String>,
    replies: Vec<Value>,
}

impl BridgeWorld {
    /// World whose bridge starts without metadata.
    pub fn new() -> Self {
        Self {
            loader: TestConfigLoader::new(),
            client: Arc::new(RecordingClient::default()),
            reporter: Arc::new(RecordingHealthReporter::default()),
            bridge: None,
            input: Vec::new(),
            replies: Vec::new(),
        }
    }

    /// Replaces the bundle metadata the bridge starts from.
    pub fn use_metadata(&mut self, metadata: &Value) {
        self.loader = TestConfigLoader::with_metadata(metadata);
        self.bridge = None;
    }

    /// Runs bootstrap once.
    pub fn bootstrap(&mut self) {
        if self.bridge.is_some() {
            return;
        }
        let bridge = bootstrap_with(&self.loader, self.reporter.clone(), self.client.clone())
            .expect("bootstrap should succeed");
        self.bridge = Some(bridge);
    }

    /// Queues a raw request line.
    pub fn receive(&mut self, line: &str) {
        self.input.push(line.to_owned());
    }

    /// Serves every queued line through a channel session.
    pub fn serve(&mut self) {
        self.bootstrap();
        let bridge = self.bridge.as_ref().expect("bridge should be bootstrapped");
        let mut input = self.input.join("\n");
        input.push('\n');
        let mut output = Vec::new();
        let handled = bridge
            .session()
            .serve(input.as_bytes(), &mut output)
            .expect("session should complete");
        let text = String::from_utf8(output).expect("replies should be UTF-8");
        self.replies = text
            .lines()
            .map(|line| serde_json::from_str(line).expect("reply should be JSON"))
            .collect();
        assert_eq!(handled, self.replies.len(), "one reply per request");
    }

    /// Reply at a one-based position.
    pub fn reply(&self, position: usize) -> Option<&Value> {
        position
            .checked_sub(1)
            .and_then(|index| self.replies.get(index))
    }

    /// Startup outcome of the bootstrapped bridge.
    pub fn startup(&self) -> Option<&StartupOutcome> {
        self.bridge.as_ref().map(Bridge::startup)
    }
}

impl Default for BridgeWorld {
    fn default() -> Self {
        Self::new()
    }
}
