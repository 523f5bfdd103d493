//! Method call deserialisation.

use serde::Deserialize;
use serde_json::Value;

use super::errors::ChannelError;

/// One method call received from the application layer.
///
/// ```json
/// {"method":"capture","arguments":{"eventName":"signup"}}
/// ```
///
/// `arguments` may be omitted or `null`; both read as an absent bag.
#[derive(Debug, Deserialize)]
pub struct MethodCall {
    /// Command name.
    pub method: String,
    /// Loosely-typed arguments forwarded to the dispatcher.
    #[serde(default)]
    pub arguments: Option<Value>,
}

impl MethodCall {
    /// Parses a JSON line into a method call.
    ///
    /// Trailing whitespace (including the newline delimiter) is trimmed before
    /// parsing.
    ///
    /// # Errors
    ///
    /// Returns `ChannelError::MalformedCall` if the line is empty or does not
    /// match the method call schema.
    pub fn parse(line: &[u8]) -> Result<Self, ChannelError> {
        let trimmed = trim_trailing_whitespace(line);
        if trimmed.is_empty() {
            return Err(ChannelError::malformed("empty request line"));
        }

        serde_json::from_slice(trimmed).map_err(ChannelError::from_json_error)
    }
}

fn trim_trailing_whitespace(bytes: &[u8]) -> &[u8] {
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(0, |pos| pos + 1);
    bytes.get(..end).unwrap_or_default()
}
