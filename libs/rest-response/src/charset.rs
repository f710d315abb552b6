use std::fmt;
use std::str::FromStr;

use crate::error::{DecodeError, ResponseError};

/// Text encodings the adapter can decode a body with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Charset {
    #[default]
    Utf8,
    UsAscii,
    /// ISO-8859-1; every byte maps to the code point of the same value.
    Latin1,
}

impl Charset {
    /// Canonical label.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Charset::Utf8 => "utf-8",
            Charset::UsAscii => "us-ascii",
            Charset::Latin1 => "iso-8859-1",
        }
    }

    /// Decode `bytes` strictly. Invalid input fails rather than being replaced.
    ///
    /// # Errors
    /// Returns [`ResponseError::Decode`] when `bytes` are not valid in this charset.
    pub fn decode(self, bytes: &[u8]) -> Result<String, ResponseError> {
        let decoded = match self {
            Charset::Utf8 => std::str::from_utf8(bytes)
                .map(str::to_owned)
                .map_err(DecodeError::from),
            Charset::UsAscii => match bytes.iter().position(|b| !b.is_ascii()) {
                Some(offset) => Err(DecodeError::NonAscii {
                    byte: bytes[offset],
                    offset,
                }),
                None => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            },
            Charset::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
        };
        decoded.map_err(|source| ResponseError::Decode {
            charset: self.name(),
            source,
        })
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Charset {
    type Err = ResponseError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        let label = label.trim().trim_matches('"');
        match label.to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Charset::Utf8),
            "us-ascii" | "ascii" | "ansi_x3.4-1968" => Ok(Charset::UsAscii),
            "iso-8859-1" | "iso8859-1" | "iso_8859-1" | "latin1" | "l1" => Ok(Charset::Latin1),
            _ => Err(ResponseError::UnsupportedCharset(label.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labels() {
        assert_eq!("UTF-8".parse::<Charset>().unwrap(), Charset::Utf8);
        assert_eq!("\"utf8\"".parse::<Charset>().unwrap(), Charset::Utf8);
        assert_eq!("US-ASCII".parse::<Charset>().unwrap(), Charset::UsAscii);
        assert_eq!("ISO-8859-1".parse::<Charset>().unwrap(), Charset::Latin1);
        assert_eq!("latin1".parse::<Charset>().unwrap(), Charset::Latin1);
    }

    #[test]
    fn test_parse_unknown_label() {
        let err = "shift_jis".parse::<Charset>().unwrap_err();
        assert!(matches!(err, ResponseError::UnsupportedCharset(ref s) if s == "shift_jis"));
    }

    #[test]
    fn test_decode_utf8_rejects_invalid_sequence() {
        let err = Charset::Utf8.decode(&[0xFF, 0xFE]).unwrap_err();
        assert!(matches!(
            err,
            ResponseError::Decode {
                charset: "utf-8",
                source: DecodeError::Utf8(_)
            }
        ));
    }

    #[test]
    fn test_decode_latin1_maps_every_byte() {
        assert_eq!(Charset::Latin1.decode(b"caf\xE9").unwrap(), "caf\u{e9}");
    }

    #[test]
    fn test_decode_ascii_reports_offset() {
        let err = Charset::UsAscii.decode(b"ok\x80").unwrap_err();
        assert!(matches!(
            err,
            ResponseError::Decode {
                source: DecodeError::NonAscii { byte: 0x80, offset: 2 },
                ..
            }
        ));
    }
}
