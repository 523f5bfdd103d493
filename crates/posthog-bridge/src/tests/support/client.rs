//! Recording analytics client used across the dispatch suites.

use std::sync::Mutex;

use serde_json::{Map, Value};

use crate::client::{AnalyticsClient, ClientError, Properties};
use crate::resolver::ClientConfiguration;

/// One call received by the recording client.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientCall {
    Setup(ClientConfiguration),
    GetFeatureFlag(String),
    IsFeatureEnabled(String),
    GetFeatureFlagPayload(String),
    Identify {
        distinct_id: String,
        user_properties: Option<Properties>,
        user_properties_set_once: Option<Properties>,
    },
    Capture {
        event: String,
        properties: Option<Properties>,
    },
    Screen {
        screen_name: String,
        properties: Option<Properties>,
    },
    Alias(String),
    GetDistinctId,
    Reset,
    OptIn,
    OptOut,
    SetDebug(bool),
    ReloadFeatureFlags,
    Group {
        group_type: String,
        group_key: String,
        group_properties: Option<Properties>,
    },
    Register(Properties),
    Unregister(String),
    Flush,
}

impl ClientCall {
    /// Client operation name, matching the dispatch table's `operation`.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Setup(_) => "setup",
            Self::GetFeatureFlag(_) => "getFeatureFlag",
            Self::IsFeatureEnabled(_) => "isFeatureEnabled",
            Self::GetFeatureFlagPayload(_) => "getFeatureFlagPayload",
            Self::Identify { .. } => "identify",
            Self::Capture { .. } => "capture",
            Self::Screen { .. } => "screen",
            Self::Alias(_) => "alias",
            Self::GetDistinctId => "getDistinctId",
            Self::Reset => "reset",
            Self::OptIn => "optIn",
            Self::OptOut => "optOut",
            Self::SetDebug(_) => "setDebug",
            Self::ReloadFeatureFlags => "reloadFeatureFlags",
            Self::Group { .. } => "group",
            Self::Register(_) => "register",
            Self::Unregister(_) => "unregister",
            Self::Flush => "flush",
        }
    }
}

/// Client double that records every call and answers from canned values.
#[derive(Debug, Default)]
pub struct RecordingClient {
    calls: Mutex<Vec<ClientCall>>,
    flags: Mutex<Map<String, Value>>,
    payloads: Mutex<Map<String, Value>>,
    failure: Mutex<Option<String>>,
}

impl RecordingClient {
    /// Snapshot of the calls received so far.
    pub fn calls(&self) -> Vec<ClientCall> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }

    /// Operation names of the calls received so far.
    pub fn operations(&self) -> Vec<&'static str> {
        self.calls().iter().map(ClientCall::operation).collect()
    }

    /// Configurations received through `setup`, oldest first.
    pub fn setups(&self) -> Vec<ClientConfiguration> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ClientCall::Setup(configuration) => Some(configuration),
                _ => None,
            })
            .collect()
    }

    /// Sets the value returned for a feature flag.
    pub fn set_flag(&self, key: &str, value: Value) {
        self.flags
            .lock()
            .expect("flags mutex poisoned")
            .insert(key.to_owned(), value);
    }

    /// Sets the payload returned for a feature flag.
    pub fn set_payload(&self, key: &str, value: Value) {
        self.payloads
            .lock()
            .expect("payloads mutex poisoned")
            .insert(key.to_owned(), value);
    }

    /// Makes every subsequent call fail with `message`.
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().expect("failure mutex poisoned") = Some(message.to_owned());
    }

    fn record(&self, call: ClientCall) -> Result<(), ClientError> {
        self.calls.lock().expect("calls mutex poisoned").push(call);
        match self.failure.lock().expect("failure mutex poisoned").as_deref() {
            Some(message) => Err(ClientError::new(message)),
            None => Ok(()),
        }
    }

    fn flag(&self, key: &str) -> Option<Value> {
        self.flags
            .lock()
            .expect("flags mutex poisoned")
            .get(key)
            .cloned()
    }
}

impl AnalyticsClient for RecordingClient {
    fn setup(&self, configuration: ClientConfiguration) -> Result<(), ClientError> {
        self.record(ClientCall::Setup(configuration))
    }

    fn get_feature_flag(&self, key: &str) -> Result<Option<Value>, ClientError> {
        self.record(ClientCall::GetFeatureFlag(key.to_owned()))?;
        Ok(self.flag(key))
    }

    fn is_feature_enabled(&self, key: &str) -> Result<bool, ClientError> {
        self.record(ClientCall::IsFeatureEnabled(key.to_owned()))?;
        Ok(self
            .flag(key)
            .is_some_and(|value| value != Value::Bool(false) && !value.is_null()))
    }

    fn get_feature_flag_payload(&self, key: &str) -> Result<Option<Value>, ClientError> {
        self.record(ClientCall::GetFeatureFlagPayload(key.to_owned()))?;
        Ok(self
            .payloads
            .lock()
            .expect("payloads mutex poisoned")
            .get(key)
            .cloned())
    }

    fn identify(
        &self,
        distinct_id: &str,
        user_properties: Option<Properties>,
        user_properties_set_once: Option<Properties>,
    ) -> Result<(), ClientError> {
        self.record(ClientCall::Identify {
            distinct_id: distinct_id.to_owned(),
            user_properties,
            user_properties_set_once,
        })
    }

    fn capture(&self, event: &str, properties: Option<Properties>) -> Result<(), ClientError> {
        self.record(ClientCall::Capture {
            event: event.to_owned(),
            properties,
        })
    }

    fn screen(&self, screen_name: &str, properties: Option<Properties>) -> Result<(), ClientError> {
        self.record(ClientCall::Screen {
            screen_name: screen_name.to_owned(),
            properties,
        })
    }

    fn alias(&self, alias: &str) -> Result<(), ClientError> {
        self.record(ClientCall::Alias(alias.to_owned()))
    }

    fn get_distinct_id(&self) -> Result<String, ClientError> {
        self.record(ClientCall::GetDistinctId)?;
        Ok("recorded-distinct-id".to_owned())
    }

    fn reset(&self) -> Result<(), ClientError> {
        self.record(ClientCall::Reset)
    }

    fn opt_in(&self) -> Result<(), ClientError> {
        self.record(ClientCall::OptIn)
    }

    fn opt_out(&self) -> Result<(), ClientError> {
        self.record(ClientCall::OptOut)
    }

    fn set_debug(&self, enabled: bool) -> Result<(), ClientError> {
        self.record(ClientCall::SetDebug(enabled))
    }

    fn reload_feature_flags(&self) -> Result<(), ClientError> {
        self.record(ClientCall::ReloadFeatureFlags)
    }

    fn group(
        &self,
        group_type: &str,
        group_key: &str,
        group_properties: Option<Properties>,
    ) -> Result<(), ClientError> {
        self.record(ClientCall::Group {
            group_type: group_type.to_owned(),
            group_key: group_key.to_owned(),
            group_properties,
        })
    }

    fn register(&self, properties: Properties) -> Result<(), ClientError> {
        self.record(ClientCall::Register(properties))
    }

    fn unregister(&self, key: &str) -> Result<(), ClientError> {
        self.record(ClientCall::Unregister(key.to_owned()))
    }

    fn flush(&self) -> Result<(), ClientError> {
        self.record(ClientCall::Flush)
    }
}
