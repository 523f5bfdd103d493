//! Typed access to the loosely-typed argument bag.
//!
//! Each invocation may carry a JSON object of arguments. Handlers read it
//! through the extraction helpers here instead of matching on raw values:
//! required keys demand an exact type, while optional keys of the wrong type
//! read as absent.

use serde_json::{Map, Value};

use super::errors::DispatchError;
use crate::client::Properties;

/// Expected type of an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentKind {
    /// A JSON string.
    String,
    /// A JSON boolean.
    Bool,
    /// A JSON object.
    Map,
    /// Any present value, including `null`.
    Any,
}

impl ArgumentKind {
    /// Returns true when the value has this kind.
    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Bool => value.is_boolean(),
            Self::Map => value.is_object(),
            Self::Any => true,
        }
    }

    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Bool => "bool",
            Self::Map => "map",
            Self::Any => "any",
        }
    }
}

/// Declared argument of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgumentSpec {
    /// Argument key. Case-sensitive.
    pub key: &'static str,
    /// Expected type.
    pub kind: ArgumentKind,
}

impl ArgumentSpec {
    /// Declares a string argument.
    #[must_use]
    pub const fn string(key: &'static str) -> Self {
        Self {
            key,
            kind: ArgumentKind::String,
        }
    }

    /// Declares a boolean argument.
    #[must_use]
    pub const fn bool(key: &'static str) -> Self {
        Self {
            key,
            kind: ArgumentKind::Bool,
        }
    }

    /// Declares an object argument.
    #[must_use]
    pub const fn map(key: &'static str) -> Self {
        Self {
            key,
            kind: ArgumentKind::Map,
        }
    }

    /// Declares an argument that accepts any present value.
    #[must_use]
    pub const fn any(key: &'static str) -> Self {
        Self {
            key,
            kind: ArgumentKind::Any,
        }
    }

    /// Checks that the bag holds this argument with the expected type.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::BadArguments` if the key is missing or has
    /// the wrong type.
    pub fn check(&self, arguments: &ArgumentBag) -> Result<(), DispatchError> {
        match arguments.get(self.key) {
            None => Err(missing(self.key)),
            Some(value) if self.kind.matches(value) => Ok(()),
            Some(_) => Err(mistyped(self.key, self.kind)),
        }
    }
}

/// Arguments supplied with one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentBag {
    entries: Map<String, Value>,
}

impl ArgumentBag {
    /// Wraps an argument object.
    #[must_use]
    pub const fn new(entries: Map<String, Value>) -> Self {
        Self { entries }
    }

    /// Accepts the raw arguments of an invocation.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::BadArguments` when the arguments are absent,
    /// `null`, or not an object.
    pub fn from_invocation(arguments: Option<Value>) -> Result<Self, DispatchError> {
        match arguments {
            Some(Value::Object(entries)) => Ok(Self::new(entries)),
            Some(Value::Null) | None => Err(DispatchError::bad_arguments("arguments are missing")),
            Some(_) => Err(DispatchError::bad_arguments("arguments are not a map")),
        }
    }

    /// Returns the raw value for a key. `null` entries are present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Returns a required string.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::BadArguments` if the key is missing or not a
    /// string.
    pub fn required_str(&self, key: &str) -> Result<&str, DispatchError> {
        match self.get(key) {
            None => Err(missing(key)),
            Some(value) => value
                .as_str()
                .ok_or_else(|| mistyped(key, ArgumentKind::String)),
        }
    }

    /// Returns a required string that must not be empty.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::BadArguments` if the key is missing, not a
    /// string, or empty.
    pub fn required_non_empty_str(&self, key: &str) -> Result<&str, DispatchError> {
        let value = self.required_str(key)?;
        if value.is_empty() {
            return Err(DispatchError::bad_arguments(format!("'{key}' is empty")));
        }
        Ok(value)
    }

    /// Returns a required boolean.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::BadArguments` if the key is missing or not a
    /// boolean.
    pub fn required_bool(&self, key: &str) -> Result<bool, DispatchError> {
        match self.get(key) {
            None => Err(missing(key)),
            Some(value) => value
                .as_bool()
                .ok_or_else(|| mistyped(key, ArgumentKind::Bool)),
        }
    }

    /// Returns a required value of any type, `null` included.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::BadArguments` if the key is missing.
    pub fn required_value(&self, key: &str) -> Result<&Value, DispatchError> {
        self.get(key).ok_or_else(|| missing(key))
    }

    /// Returns an optional string; other types read as absent.
    #[must_use]
    pub fn optional_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Returns an optional boolean; other types read as absent.
    #[must_use]
    pub fn optional_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// Returns an optional object; other types read as absent.
    #[must_use]
    pub fn optional_map(&self, key: &str) -> Option<Properties> {
        self.get(key).and_then(Value::as_object).cloned()
    }
}

fn missing(key: &str) -> DispatchError {
    DispatchError::bad_arguments(format!("missing required key '{key}'"))
}

fn mistyped(key: &str, expected: ArgumentKind) -> DispatchError {
    DispatchError::bad_arguments(format!("'{key}' must be a {}", expected.as_str()))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn bag(arguments: Value) -> ArgumentBag {
        ArgumentBag::from_invocation(Some(arguments)).expect("argument object")
    }

    #[rstest]
    #[case::absent(None)]
    #[case::null(Some(Value::Null))]
    #[case::list(Some(json!(["key"])))]
    #[case::string(Some(json!("key")))]
    fn rejects_non_object_bags(#[case] arguments: Option<Value>) {
        let result = ArgumentBag::from_invocation(arguments);
        assert!(matches!(result, Err(DispatchError::BadArguments { .. })));
    }

    #[test]
    fn required_str_demands_exact_type() {
        let arguments = bag(json!({"name": "signup", "count": 3, "blank": null}));
        assert_eq!(arguments.required_str("name").expect("string"), "signup");
        assert!(arguments.required_str("count").is_err());
        assert!(arguments.required_str("blank").is_err());
        assert!(arguments.required_str("Name").is_err());
    }

    #[test]
    fn required_non_empty_str_rejects_empty() {
        let arguments = bag(json!({"apiKey": ""}));
        let error = arguments
            .required_non_empty_str("apiKey")
            .expect_err("empty key");
        assert!(matches!(error, DispatchError::BadArguments { ref reason } if reason.contains("empty")));
    }

    #[test]
    fn required_bool_rejects_truthy_values() {
        let arguments = bag(json!({"debug": 1, "other": false}));
        assert!(arguments.required_bool("debug").is_err());
        assert!(!arguments.required_bool("other").expect("bool"));
    }

    #[test]
    fn required_value_accepts_falsy_and_null() {
        let arguments = bag(json!({"zero": 0, "null": null}));
        assert_eq!(arguments.required_value("zero").expect("present"), &json!(0));
        assert_eq!(arguments.required_value("null").expect("present"), &Value::Null);
        assert!(arguments.required_value("absent").is_err());
    }

    #[test]
    fn optional_helpers_ignore_wrong_types() {
        let arguments = bag(json!({"properties": "nope", "flag": "true", "host": 9}));
        assert!(arguments.optional_map("properties").is_none());
        assert!(arguments.optional_bool("flag").is_none());
        assert!(arguments.optional_str("host").is_none());
        assert!(arguments.optional_map("missing").is_none());
    }

    #[test]
    fn optional_map_clones_object() {
        let arguments = bag(json!({"properties": {"plan": "pro"}}));
        let properties = arguments.optional_map("properties").expect("map");
        assert_eq!(properties.get("plan"), Some(&json!("pro")));
    }

    #[rstest]
    #[case::string(ArgumentSpec::string("k"), json!({"k": "v"}), true)]
    #[case::string_mistyped(ArgumentSpec::string("k"), json!({"k": 1}), false)]
    #[case::bool(ArgumentSpec::bool("k"), json!({"k": true}), true)]
    #[case::bool_mistyped(ArgumentSpec::bool("k"), json!({"k": "true"}), false)]
    #[case::map(ArgumentSpec::map("k"), json!({"k": {}}), true)]
    #[case::any_zero(ArgumentSpec::any("k"), json!({"k": 0}), true)]
    #[case::any_null(ArgumentSpec::any("k"), json!({"k": null}), true)]
    #[case::any_missing(ArgumentSpec::any("k"), json!({}), false)]
    fn spec_checks_presence_and_kind(
        #[case] spec: ArgumentSpec,
        #[case] arguments: Value,
        #[case] accepted: bool,
    ) {
        assert_eq!(spec.check(&bag(arguments)).is_ok(), accepted);
    }
}
