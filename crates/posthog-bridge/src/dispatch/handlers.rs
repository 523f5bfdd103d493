//! Per-command handlers.
//!
//! Each handler extracts its typed arguments and makes exactly one client
//! call. Arguments have already passed the command's schema check, so the
//! extraction helpers only fail if a handler and its table entry disagree.

use serde_json::Value;

use super::arguments::ArgumentBag;
use super::errors::DispatchError;
use crate::client::{AnalyticsClient, Properties};
use crate::resolver::{self, ClientConfiguration, ConfigurationTrigger};

type HandlerResult = Result<Value, DispatchError>;

pub(super) fn configure(client: &dyn AnalyticsClient, arguments: &ArgumentBag) -> HandlerResult {
    let configuration = ClientConfiguration::from_arguments(arguments)?;
    resolver::apply(client, configuration, ConfigurationTrigger::Configure)?;
    Ok(Value::Null)
}

pub(super) fn get_feature_flag(
    client: &dyn AnalyticsClient,
    arguments: &ArgumentBag,
) -> HandlerResult {
    let key = arguments.required_str("key")?;
    Ok(client.get_feature_flag(key)?.unwrap_or(Value::Null))
}

pub(super) fn is_feature_enabled(
    client: &dyn AnalyticsClient,
    arguments: &ArgumentBag,
) -> HandlerResult {
    let key = arguments.required_str("key")?;
    Ok(Value::Bool(client.is_feature_enabled(key)?))
}

pub(super) fn get_feature_flag_payload(
    client: &dyn AnalyticsClient,
    arguments: &ArgumentBag,
) -> HandlerResult {
    let key = arguments.required_str("key")?;
    Ok(client.get_feature_flag_payload(key)?.unwrap_or(Value::Null))
}

pub(super) fn identify(client: &dyn AnalyticsClient, arguments: &ArgumentBag) -> HandlerResult {
    let user_id = arguments.required_str("userId")?;
    client.identify(
        user_id,
        arguments.optional_map("userProperties"),
        arguments.optional_map("userPropertiesSetOnce"),
    )?;
    Ok(Value::Null)
}

pub(super) fn capture(client: &dyn AnalyticsClient, arguments: &ArgumentBag) -> HandlerResult {
    let event = arguments.required_str("eventName")?;
    client.capture(event, arguments.optional_map("properties"))?;
    Ok(Value::Null)
}

pub(super) fn screen(client: &dyn AnalyticsClient, arguments: &ArgumentBag) -> HandlerResult {
    let screen_name = arguments.required_str("screenName")?;
    client.screen(screen_name, arguments.optional_map("properties"))?;
    Ok(Value::Null)
}

pub(super) fn alias(client: &dyn AnalyticsClient, arguments: &ArgumentBag) -> HandlerResult {
    client.alias(arguments.required_str("alias")?)?;
    Ok(Value::Null)
}

pub(super) fn distinct_id(client: &dyn AnalyticsClient, _arguments: &ArgumentBag) -> HandlerResult {
    Ok(Value::String(client.get_distinct_id()?))
}

pub(super) fn reset(client: &dyn AnalyticsClient, _arguments: &ArgumentBag) -> HandlerResult {
    client.reset()?;
    Ok(Value::Null)
}

pub(super) fn enable(client: &dyn AnalyticsClient, _arguments: &ArgumentBag) -> HandlerResult {
    client.opt_in()?;
    Ok(Value::Null)
}

pub(super) fn disable(client: &dyn AnalyticsClient, _arguments: &ArgumentBag) -> HandlerResult {
    client.opt_out()?;
    Ok(Value::Null)
}

pub(super) fn debug(client: &dyn AnalyticsClient, arguments: &ArgumentBag) -> HandlerResult {
    client.set_debug(arguments.required_bool("debug")?)?;
    Ok(Value::Null)
}

pub(super) fn reload_feature_flags(
    client: &dyn AnalyticsClient,
    _arguments: &ArgumentBag,
) -> HandlerResult {
    client.reload_feature_flags()?;
    Ok(Value::Null)
}

pub(super) fn group(client: &dyn AnalyticsClient, arguments: &ArgumentBag) -> HandlerResult {
    let group_type = arguments.required_str("groupType")?;
    let group_key = arguments.required_str("groupKey")?;
    client.group(
        group_type,
        group_key,
        arguments.optional_map("groupProperties"),
    )?;
    Ok(Value::Null)
}

pub(super) fn register(client: &dyn AnalyticsClient, arguments: &ArgumentBag) -> HandlerResult {
    let key = arguments.required_str("key")?;
    let value = arguments.required_value("value")?;
    let mut properties = Properties::new();
    properties.insert(key.to_owned(), value.clone());
    client.register(properties)?;
    Ok(Value::Null)
}

pub(super) fn unregister(client: &dyn AnalyticsClient, arguments: &ArgumentBag) -> HandlerResult {
    client.unregister(arguments.required_str("key")?)?;
    Ok(Value::Null)
}

pub(super) fn flush(client: &dyn AnalyticsClient, _arguments: &ArgumentBag) -> HandlerResult {
    client.flush()?;
    Ok(Value::Null)
}
