use std::io;
use std::str::Utf8Error;
use thiserror::Error;

/// Signals that a one-shot content stream has already been handed out or read.
///
/// Readers report it by failing with `io::Error::other(StreamAlreadyConsumed)`.
/// Consumption absorbs it into an empty body, and the raw stream escape hatch
/// reports it as `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Error)]
#[error("content stream has already been consumed")]
pub struct StreamAlreadyConsumed;

impl StreamAlreadyConsumed {
    /// Wrap into an `io::Error` so custom readers can return it from `read`.
    #[must_use]
    pub fn into_io_error(self) -> io::Error {
        io::Error::other(self)
    }

    /// Check whether an I/O error carries this condition.
    #[must_use]
    pub fn is_cause_of(err: &io::Error) -> bool {
        err.get_ref()
            .is_some_and(|inner| inner.is::<StreamAlreadyConsumed>())
    }
}

/// Error types for response body access
#[derive(Debug, Error)]
pub enum ResponseError {
    /// Reading the content stream failed for a reason other than
    /// [`StreamAlreadyConsumed`]. Consumption may be retried.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The body bytes are not valid for the charset used to decode them.
    #[error("Decode error ({charset}): {source}")]
    Decode {
        charset: &'static str,
        #[source]
        source: DecodeError,
    },

    /// The response declared, or configuration asked for, a charset this
    /// adapter cannot decode.
    #[error("Unsupported charset: {0}")]
    UnsupportedCharset(String),

    /// The body text is not JSON of the requested shape.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ResponseError {
    /// True for the I/O failure raised by a stream that was already consumed.
    ///
    /// Accessors never surface this themselves; it is exposed for callers
    /// draining a stream obtained from `raw_stream`.
    #[must_use]
    pub fn is_already_consumed(&self) -> bool {
        matches!(self, ResponseError::Io(e) if StreamAlreadyConsumed::is_cause_of(e))
    }
}

/// Byte-level decode failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("invalid UTF-8: {0}")]
    Utf8(#[from] Utf8Error),

    #[error("byte 0x{byte:02X} at offset {offset} is not ASCII")]
    NonAscii { byte: u8, offset: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_consumed_roundtrips_through_io_error() {
        let err = StreamAlreadyConsumed.into_io_error();
        assert!(StreamAlreadyConsumed::is_cause_of(&err));
        assert!(ResponseError::from(err).is_already_consumed());
    }

    #[test]
    fn test_plain_io_error_is_not_already_consumed() {
        let err = io::Error::new(io::ErrorKind::ConnectionReset, "reset by peer");
        assert!(!StreamAlreadyConsumed::is_cause_of(&err));
        assert!(!ResponseError::from(err).is_already_consumed());
    }

    #[test]
    fn test_display_messages() {
        let err = ResponseError::UnsupportedCharset("koi8-r".to_string());
        assert_eq!(err.to_string(), "Unsupported charset: koi8-r");

        let err = ResponseError::Decode {
            charset: "us-ascii",
            source: DecodeError::NonAscii { byte: 0xC3, offset: 4 },
        };
        assert_eq!(
            err.to_string(),
            "Decode error (us-ascii): byte 0xC3 at offset 4 is not ASCII"
        );
    }
}
