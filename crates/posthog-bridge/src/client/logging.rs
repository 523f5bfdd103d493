//! Stand-in analytics client used when no native client is linked.

use std::sync::{Mutex, MutexGuard};

use serde_json::Value;
use uuid::Uuid;

use super::{AnalyticsClient, ClientError, Properties};
use crate::resolver::ClientConfiguration;

const CLIENT_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::client::logging");

#[derive(Debug, Default)]
struct ClientState {
    configuration: Option<ClientConfiguration>,
    distinct_id: Option<String>,
    super_properties: Properties,
    opted_out: bool,
    debug: bool,
}

impl ClientState {
    fn accepts_events(&self) -> bool {
        self.configuration.is_some() && !self.opted_out
    }
}

/// Client that records state in memory and logs every request.
///
/// Events are never transmitted. Feature flag queries always report unknown
/// flags, since there is no server to evaluate them.
#[derive(Debug, Default)]
pub struct LoggingAnalyticsClient {
    state: Mutex<ClientState>,
}

impl LoggingAnalyticsClient {
    /// Builds an unconfigured client.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration most recently applied through [`AnalyticsClient::setup`].
    pub fn configuration(&self) -> Result<Option<ClientConfiguration>, ClientError> {
        Ok(self.lock()?.configuration.clone())
    }

    /// Current super properties.
    pub fn super_properties(&self) -> Result<Properties, ClientError> {
        Ok(self.lock()?.super_properties.clone())
    }

    /// Whether capturing has been disabled via [`AnalyticsClient::opt_out`].
    pub fn is_opted_out(&self) -> Result<bool, ClientError> {
        Ok(self.lock()?.opted_out)
    }

    /// Whether recorded events are logged with their full payloads.
    pub fn is_debug_enabled(&self) -> Result<bool, ClientError> {
        Ok(self.lock()?.debug)
    }

    fn lock(&self) -> Result<MutexGuard<'_, ClientState>, ClientError> {
        self.state
            .lock()
            .map_err(|_| ClientError::new("client state lock poisoned"))
    }

    fn record_event(
        &self,
        kind: &'static str,
        name: &str,
        properties: Option<&Properties>,
    ) -> Result<(), ClientError> {
        let state = self.lock()?;
        if !state.accepts_events() {
            tracing::debug!(
                target: CLIENT_TARGET,
                kind,
                name,
                configured = state.configuration.is_some(),
                opted_out = state.opted_out,
                "dropping event"
            );
            return Ok(());
        }
        tracing::info!(
            target: CLIENT_TARGET,
            kind,
            name,
            distinct_id = state.distinct_id.as_deref().unwrap_or_default(),
            properties = properties.map_or(0, Properties::len),
            super_properties = state.super_properties.len(),
            "event recorded"
        );
        if state.debug {
            tracing::info!(
                target: CLIENT_TARGET,
                kind,
                name,
                properties = ?properties,
                super_properties = ?state.super_properties,
                "event payload"
            );
        }
        Ok(())
    }
}

impl AnalyticsClient for LoggingAnalyticsClient {
    fn setup(&self, configuration: ClientConfiguration) -> Result<(), ClientError> {
        let mut state = self.lock()?;
        tracing::info!(
            target: CLIENT_TARGET,
            host = %configuration.host,
            lifecycle_events = configuration.capture_application_lifecycle_events,
            debug = configuration.debug,
            sdk_name = configuration.sdk.name,
            sdk_version = configuration.sdk.version,
            "client configured"
        );
        state.debug = configuration.debug;
        state.configuration = Some(configuration);
        Ok(())
    }

    fn get_feature_flag(&self, key: &str) -> Result<Option<Value>, ClientError> {
        tracing::debug!(target: CLIENT_TARGET, key, "feature flag requested");
        Ok(None)
    }

    fn is_feature_enabled(&self, key: &str) -> Result<bool, ClientError> {
        tracing::debug!(target: CLIENT_TARGET, key, "feature flag check requested");
        Ok(false)
    }

    fn get_feature_flag_payload(&self, key: &str) -> Result<Option<Value>, ClientError> {
        tracing::debug!(target: CLIENT_TARGET, key, "feature flag payload requested");
        Ok(None)
    }

    fn identify(
        &self,
        distinct_id: &str,
        user_properties: Option<Properties>,
        user_properties_set_once: Option<Properties>,
    ) -> Result<(), ClientError> {
        let mut state = self.lock()?;
        state.distinct_id = Some(distinct_id.to_owned());
        tracing::info!(
            target: CLIENT_TARGET,
            distinct_id,
            user_properties = user_properties.as_ref().map_or(0, Properties::len),
            user_properties_set_once = user_properties_set_once.as_ref().map_or(0, Properties::len),
            "user identified"
        );
        Ok(())
    }

    fn capture(&self, event: &str, properties: Option<Properties>) -> Result<(), ClientError> {
        self.record_event("capture", event, properties.as_ref())
    }

    fn screen(&self, screen_name: &str, properties: Option<Properties>) -> Result<(), ClientError> {
        self.record_event("screen", screen_name, properties.as_ref())
    }

    fn alias(&self, alias: &str) -> Result<(), ClientError> {
        self.record_event("alias", alias, None)
    }

    fn get_distinct_id(&self) -> Result<String, ClientError> {
        let mut state = self.lock()?;
        let id = state
            .distinct_id
            .get_or_insert_with(|| Uuid::new_v4().to_string());
        Ok(id.clone())
    }

    fn reset(&self) -> Result<(), ClientError> {
        let mut state = self.lock()?;
        state.distinct_id = None;
        state.super_properties.clear();
        tracing::info!(target: CLIENT_TARGET, "identity reset");
        Ok(())
    }

    fn opt_in(&self) -> Result<(), ClientError> {
        self.lock()?.opted_out = false;
        tracing::info!(target: CLIENT_TARGET, "capturing enabled");
        Ok(())
    }

    fn opt_out(&self) -> Result<(), ClientError> {
        self.lock()?.opted_out = true;
        tracing::info!(target: CLIENT_TARGET, "capturing disabled");
        Ok(())
    }

    fn set_debug(&self, enabled: bool) -> Result<(), ClientError> {
        self.lock()?.debug = enabled;
        tracing::info!(target: CLIENT_TARGET, enabled, "debug toggled");
        Ok(())
    }

    fn reload_feature_flags(&self) -> Result<(), ClientError> {
        tracing::debug!(target: CLIENT_TARGET, "feature flag reload requested");
        Ok(())
    }

    fn group(
        &self,
        group_type: &str,
        group_key: &str,
        group_properties: Option<Properties>,
    ) -> Result<(), ClientError> {
        tracing::info!(
            target: CLIENT_TARGET,
            group_type,
            group_key,
            group_properties = group_properties.as_ref().map_or(0, Properties::len),
            "group assigned"
        );
        Ok(())
    }

    fn register(&self, properties: Properties) -> Result<(), ClientError> {
        let mut state = self.lock()?;
        tracing::info!(
            target: CLIENT_TARGET,
            properties = properties.len(),
            "super properties registered"
        );
        state.super_properties.extend(properties);
        Ok(())
    }

    fn unregister(&self, key: &str) -> Result<(), ClientError> {
        let removed = self.lock()?.super_properties.remove(key).is_some();
        tracing::info!(target: CLIENT_TARGET, key, removed, "super property unregistered");
        Ok(())
    }

    fn flush(&self) -> Result<(), ClientError> {
        tracing::debug!(target: CLIENT_TARGET, "flush requested");
        Ok(())
    }
}
