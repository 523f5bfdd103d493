//! Line-oriented method channel session.
//!
//! A session reads one JSON method call per line, hands it to the dispatcher,
//! and writes exactly one reply line per request, in request order. Lines that
//! cannot be parsed or exceed [`MAX_REQUEST_BYTES`] are answered with an error
//! reply and skipped; only IO failures end the session early.

use std::io::{self, BufRead, Write};

use tracing::{debug, warn};

use super::errors::{ChannelError, MALFORMED_CALL_CODE};
use super::request::MethodCall;
use super::response::{ChannelReply, ResponseWriter};
use crate::dispatch::Dispatcher;

/// Tracing target for channel operations.
pub(crate) const CHANNEL_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::channel");

/// Maximum size of a single request line in bytes.
pub const MAX_REQUEST_BYTES: usize = 1024 * 1024;

/// Serves method calls from a reader until end of input.
#[derive(Debug, Clone)]
pub struct ChannelSession {
    dispatcher: Dispatcher,
    max_request_bytes: usize,
}

impl ChannelSession {
    /// Creates a session that forwards calls to `dispatcher`.
    #[must_use]
    pub const fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            max_request_bytes: MAX_REQUEST_BYTES,
        }
    }

    /// Overrides the request size limit.
    #[must_use]
    pub const fn with_max_request_bytes(mut self, max_request_bytes: usize) -> Self {
        self.max_request_bytes = max_request_bytes;
        self
    }

    /// Processes request lines until EOF and returns the number of replies
    /// written.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Io`] or [`ChannelError::SerializeReply`] when
    /// the underlying streams fail. Malformed or oversized requests do not
    /// end the session.
    pub fn serve<R: BufRead, W: Write>(
        &self,
        mut reader: R,
        writer: W,
    ) -> Result<usize, ChannelError> {
        let mut writer = ResponseWriter::new(writer);
        let mut replies = 0_usize;

        loop {
            let line = match read_bounded_line(&mut reader, self.max_request_bytes)? {
                LineRead::Eof => break,
                LineRead::TooLarge(size) => {
                    Err(ChannelError::request_too_large(size, self.max_request_bytes))
                }
                LineRead::Line(bytes) => Ok(bytes),
            };

            match line.and_then(|bytes| MethodCall::parse(&bytes)) {
                Ok(call) => self.answer(call, &mut writer)?,
                Err(error) => reject(&error, &mut writer)?,
            }
            replies += 1;
        }

        debug!(target: CHANNEL_TARGET, replies, "channel closed");
        Ok(replies)
    }

    fn answer<W: Write>(
        &self,
        call: MethodCall,
        writer: &mut ResponseWriter<W>,
    ) -> Result<(), ChannelError> {
        let result = self.dispatcher.invoke(&call.method, call.arguments);
        writer.write_reply(&ChannelReply::from(result))
    }
}

fn reject<W: Write>(error: &ChannelError, writer: &mut ResponseWriter<W>) -> Result<(), ChannelError> {
    warn!(target: CHANNEL_TARGET, %error, "rejected request line");
    let code = error.reply_code().unwrap_or(MALFORMED_CALL_CODE);
    writer.write_rejection(code, error)
}

enum LineRead {
    Line(Vec<u8>),
    TooLarge(usize),
    Eof,
}

/// Reads one newline-terminated line without buffering more than `max` bytes.
///
/// Oversized lines are consumed to their end so the next read starts on a
/// fresh request.
fn read_bounded_line<R: BufRead>(reader: &mut R, max: usize) -> io::Result<LineRead> {
    let mut buffer = Vec::new();
    let mut size = 0_usize;
    let mut overflowed = false;

    loop {
        let available = match reader.fill_buf() {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
            Err(error) => return Err(error),
        };

        if available.is_empty() {
            return Ok(match (size, overflowed) {
                (0, _) => LineRead::Eof,
                (_, true) => LineRead::TooLarge(size),
                (_, false) => LineRead::Line(buffer),
            });
        }

        let newline = available.iter().position(|byte| *byte == b'\n');
        let chunk_len = newline.map_or(available.len(), |pos| pos + 1);
        size += chunk_len;

        if size > max {
            overflowed = true;
            buffer = Vec::new();
        } else if let Some(chunk) = available.get(..chunk_len) {
            buffer.extend_from_slice(chunk);
        }
        reader.consume(chunk_len);

        if newline.is_some() {
            return Ok(if overflowed {
                LineRead::TooLarge(size)
            } else {
                LineRead::Line(buffer)
            });
        }
    }
}
