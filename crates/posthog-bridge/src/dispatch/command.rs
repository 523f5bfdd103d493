//! The closed set of commands and their dispatch table.
//!
//! Every command has exactly one [`CommandSpec`] in [`COMMAND_TABLE`]. The
//! entry declares the argument schema, names the client operation, and points
//! at the handler that performs the call.

use std::fmt;

use serde_json::Value;

use super::arguments::{ArgumentBag, ArgumentSpec};
use super::errors::DispatchError;
use super::handlers;
use crate::client::AnalyticsClient;

/// Commands understood by the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Applies an explicit client configuration.
    Configure,
    /// Reads a feature flag value.
    GetFeatureFlag,
    /// Checks whether a feature flag is enabled.
    IsFeatureEnabled,
    /// Reads a feature flag payload.
    GetFeatureFlagPayload,
    /// Identifies the current user.
    Identify,
    /// Captures a custom event.
    Capture,
    /// Records a screen view.
    Screen,
    /// Aliases the current distinct id.
    Alias,
    /// Reads the current distinct id.
    DistinctId,
    /// Clears identity and super properties.
    Reset,
    /// Opts back in to capturing.
    Enable,
    /// Opts out of capturing.
    Disable,
    /// Toggles client debug logging.
    Debug,
    /// Reloads feature flags.
    ReloadFeatureFlags,
    /// Assigns the user to a group.
    Group,
    /// Registers a super property.
    Register,
    /// Removes a super property.
    Unregister,
    /// Flushes queued events.
    Flush,
}

impl Command {
    /// Every command, in table order.
    pub const ALL: [Self; 18] = [
        Self::Configure,
        Self::GetFeatureFlag,
        Self::IsFeatureEnabled,
        Self::GetFeatureFlagPayload,
        Self::Identify,
        Self::Capture,
        Self::Screen,
        Self::Alias,
        Self::DistinctId,
        Self::Reset,
        Self::Enable,
        Self::Disable,
        Self::Debug,
        Self::ReloadFeatureFlags,
        Self::Group,
        Self::Register,
        Self::Unregister,
        Self::Flush,
    ];

    /// Parses a command name. Matching is exact and case-sensitive.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.as_str() == name)
    }

    /// Returns the wire name of the command.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Configure => "configure",
            Self::GetFeatureFlag => "getFeatureFlag",
            Self::IsFeatureEnabled => "isFeatureEnabled",
            Self::GetFeatureFlagPayload => "getFeatureFlagPayload",
            Self::Identify => "identify",
            Self::Capture => "capture",
            Self::Screen => "screen",
            Self::Alias => "alias",
            Self::DistinctId => "distinctId",
            Self::Reset => "reset",
            Self::Enable => "enable",
            Self::Disable => "disable",
            Self::Debug => "debug",
            Self::ReloadFeatureFlags => "reloadFeatureFlags",
            Self::Group => "group",
            Self::Register => "register",
            Self::Unregister => "unregister",
            Self::Flush => "flush",
        }
    }

    /// Returns the dispatch table entry for this command.
    #[must_use]
    pub fn spec(self) -> &'static CommandSpec {
        match self {
            Self::Configure => &CONFIGURE,
            Self::GetFeatureFlag => &GET_FEATURE_FLAG,
            Self::IsFeatureEnabled => &IS_FEATURE_ENABLED,
            Self::GetFeatureFlagPayload => &GET_FEATURE_FLAG_PAYLOAD,
            Self::Identify => &IDENTIFY,
            Self::Capture => &CAPTURE,
            Self::Screen => &SCREEN,
            Self::Alias => &ALIAS,
            Self::DistinctId => &DISTINCT_ID,
            Self::Reset => &RESET,
            Self::Enable => &ENABLE,
            Self::Disable => &DISABLE,
            Self::Debug => &DEBUG,
            Self::ReloadFeatureFlags => &RELOAD_FEATURE_FLAGS,
            Self::Group => &GROUP,
            Self::Register => &REGISTER,
            Self::Unregister => &UNREGISTER,
            Self::Flush => &FLUSH,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Handler performing a command's single client call.
pub(crate) type Handler =
    fn(&dyn AnalyticsClient, &ArgumentBag) -> Result<Value, DispatchError>;

/// Dispatch table entry.
pub struct CommandSpec {
    /// Command served by this entry.
    pub command: Command,
    /// Keys that must be present with the declared type.
    pub required: &'static [ArgumentSpec],
    /// Keys read when present; the wrong type reads as absent.
    pub optional: &'static [ArgumentSpec],
    /// Name of the analytics client operation the command maps to.
    pub operation: &'static str,
    handler: Handler,
}

impl CommandSpec {
    /// Wire name of the command.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.command.as_str()
    }

    /// Returns true when the command reads an argument bag.
    ///
    /// Commands without declared arguments ignore whatever bag accompanies
    /// them.
    #[must_use]
    pub fn takes_arguments(&self) -> bool {
        !self.required.is_empty() || !self.optional.is_empty()
    }

    /// Validates the arguments and runs the handler.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::BadArguments` before any client call when the
    /// arguments do not satisfy the schema, or `DispatchError::Client` when
    /// the client operation fails.
    pub fn execute(
        &self,
        client: &dyn AnalyticsClient,
        arguments: Option<Value>,
    ) -> Result<Value, DispatchError> {
        if !self.takes_arguments() {
            return (self.handler)(client, &ArgumentBag::default());
        }
        let bag = ArgumentBag::from_invocation(arguments)?;
        for spec in self.required {
            spec.check(&bag)?;
        }
        (self.handler)(client, &bag)
    }
}

impl fmt::Debug for CommandSpec {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("CommandSpec")
            .field("command", &self.command)
            .field("required", &self.required)
            .field("optional", &self.optional)
            .field("operation", &self.operation)
            .finish_non_exhaustive()
    }
}

const NONE: &[ArgumentSpec] = &[];

static CONFIGURE: CommandSpec = CommandSpec {
    command: Command::Configure,
    required: &[ArgumentSpec::string("apiKey")],
    optional: &[
        ArgumentSpec::string("host"),
        ArgumentSpec::bool("trackLifecycleEvents"),
        ArgumentSpec::bool("debug"),
    ],
    operation: "setup",
    handler: handlers::configure,
};

static GET_FEATURE_FLAG: CommandSpec = CommandSpec {
    command: Command::GetFeatureFlag,
    required: &[ArgumentSpec::string("key")],
    optional: NONE,
    operation: "getFeatureFlag",
    handler: handlers::get_feature_flag,
};

static IS_FEATURE_ENABLED: CommandSpec = CommandSpec {
    command: Command::IsFeatureEnabled,
    required: &[ArgumentSpec::string("key")],
    optional: NONE,
    operation: "isFeatureEnabled",
    handler: handlers::is_feature_enabled,
};

static GET_FEATURE_FLAG_PAYLOAD: CommandSpec = CommandSpec {
    command: Command::GetFeatureFlagPayload,
    required: &[ArgumentSpec::string("key")],
    optional: NONE,
    operation: "getFeatureFlagPayload",
    handler: handlers::get_feature_flag_payload,
};

static IDENTIFY: CommandSpec = CommandSpec {
    command: Command::Identify,
    required: &[ArgumentSpec::string("userId")],
    optional: &[
        ArgumentSpec::map("userProperties"),
        ArgumentSpec::map("userPropertiesSetOnce"),
    ],
    operation: "identify",
    handler: handlers::identify,
};

static CAPTURE: CommandSpec = CommandSpec {
    command: Command::Capture,
    required: &[ArgumentSpec::string("eventName")],
    optional: &[ArgumentSpec::map("properties")],
    operation: "capture",
    handler: handlers::capture,
};

static SCREEN: CommandSpec = CommandSpec {
    command: Command::Screen,
    required: &[ArgumentSpec::string("screenName")],
    optional: &[ArgumentSpec::map("properties")],
    operation: "screen",
    handler: handlers::screen,
};

static ALIAS: CommandSpec = CommandSpec {
    command: Command::Alias,
    required: &[ArgumentSpec::string("alias")],
    optional: NONE,
    operation: "alias",
    handler: handlers::alias,
};

static DISTINCT_ID: CommandSpec = CommandSpec {
    command: Command::DistinctId,
    required: NONE,
    optional: NONE,
    operation: "getDistinctId",
    handler: handlers::distinct_id,
};

static RESET: CommandSpec = CommandSpec {
    command: Command::Reset,
    required: NONE,
    optional: NONE,
    operation: "reset",
    handler: handlers::reset,
};

static ENABLE: CommandSpec = CommandSpec {
    command: Command::Enable,
    required: NONE,
    optional: NONE,
    operation: "optIn",
    handler: handlers::enable,
};

static DISABLE: CommandSpec = CommandSpec {
    command: Command::Disable,
    required: NONE,
    optional: NONE,
    operation: "optOut",
    handler: handlers::disable,
};

static DEBUG: CommandSpec = CommandSpec {
    command: Command::Debug,
    required: &[ArgumentSpec::bool("debug")],
    optional: NONE,
    operation: "setDebug",
    handler: handlers::debug,
};

static RELOAD_FEATURE_FLAGS: CommandSpec = CommandSpec {
    command: Command::ReloadFeatureFlags,
    required: NONE,
    optional: NONE,
    operation: "reloadFeatureFlags",
    handler: handlers::reload_feature_flags,
};

static GROUP: CommandSpec = CommandSpec {
    command: Command::Group,
    required: &[
        ArgumentSpec::string("groupType"),
        ArgumentSpec::string("groupKey"),
    ],
    optional: &[ArgumentSpec::map("groupProperties")],
    operation: "group",
    handler: handlers::group,
};

static REGISTER: CommandSpec = CommandSpec {
    command: Command::Register,
    required: &[ArgumentSpec::string("key"), ArgumentSpec::any("value")],
    optional: NONE,
    operation: "register",
    handler: handlers::register,
};

static UNREGISTER: CommandSpec = CommandSpec {
    command: Command::Unregister,
    required: &[ArgumentSpec::string("key")],
    optional: NONE,
    operation: "unregister",
    handler: handlers::unregister,
};

static FLUSH: CommandSpec = CommandSpec {
    command: Command::Flush,
    required: NONE,
    optional: NONE,
    operation: "flush",
    handler: handlers::flush,
};

/// The full dispatch table, one entry per command in [`Command::ALL`] order.
pub static COMMAND_TABLE: [&CommandSpec; 18] = [
    &CONFIGURE,
    &GET_FEATURE_FLAG,
    &IS_FEATURE_ENABLED,
    &GET_FEATURE_FLAG_PAYLOAD,
    &IDENTIFY,
    &CAPTURE,
    &SCREEN,
    &ALIAS,
    &DISTINCT_ID,
    &RESET,
    &ENABLE,
    &DISABLE,
    &DEBUG,
    &RELOAD_FEATURE_FLAGS,
    &GROUP,
    &REGISTER,
    &UNREGISTER,
    &FLUSH,
];

/// Finds the table entry for a command name.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static CommandSpec> {
    Command::parse(name).map(Command::spec)
}
