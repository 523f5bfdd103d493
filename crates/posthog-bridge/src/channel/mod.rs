//! JSON-lines method channel.
//!
//! The channel carries method calls from the application layer to the
//! [`Dispatcher`](crate::dispatch::Dispatcher) and carries replies back. Each
//! request is a single line:
//!
//! ```json
//! {"method":"isFeatureEnabled","arguments":{"key":"beta"}}
//! ```
//!
//! and each reply is a single line tagged by `kind`:
//!
//! ```json
//! {"kind":"success","result":true}
//! {"kind":"error","code":"BAD_ARGS","message":"Bad or missing arguments","details":null}
//! {"kind":"not_implemented"}
//! ```

mod errors;
mod request;
mod response;
mod session;

pub use self::errors::{ChannelError, MALFORMED_CALL_CODE, REQUEST_TOO_LARGE_CODE};
pub use self::request::MethodCall;
pub use self::response::{ChannelReply, ResponseWriter};
pub use self::session::{ChannelSession, MAX_REQUEST_BYTES};
