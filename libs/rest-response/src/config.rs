use crate::charset::Charset;
use crate::error::ResponseError;

const DEFAULT_CHARSET_ENV: &str = "REST_RESPONSE_DEFAULT_CHARSET";
const DRAIN_ON_DISPOSE_ENV: &str = "REST_RESPONSE_DRAIN_ON_DISPOSE";

/// Configuration for RestResponse body handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseOptions {
    /// Charset used when the transport declared none
    pub default_charset: Charset,
    /// Read an unconsumed stream to EOF on dispose instead of just dropping it
    pub drain_on_dispose: bool,
}

impl Default for ResponseOptions {
    fn default() -> Self {
        Self {
            default_charset: Charset::Utf8,
            drain_on_dispose: true,
        }
    }
}

impl ResponseOptions {
    /// Set the fallback charset
    #[must_use]
    pub fn with_default_charset(mut self, charset: Charset) -> Self {
        self.default_charset = charset;
        self
    }

    /// Choose whether dispose drains the stream
    #[must_use]
    pub fn with_drain_on_dispose(mut self, drain: bool) -> Self {
        self.drain_on_dispose = drain;
        self
    }

    /// Create configuration from environment variables
    ///
    /// Reads:
    /// - `REST_RESPONSE_DEFAULT_CHARSET`: fallback charset label (default: "utf-8")
    /// - `REST_RESPONSE_DRAIN_ON_DISPOSE`: "true" or "false" (default: "true")
    ///
    /// # Errors
    /// Returns [`ResponseError::Config`] for an unknown charset label or a
    /// value that is not a boolean.
    pub fn from_env() -> Result<Self, ResponseError> {
        let mut options = Self::default();

        if let Ok(label) = std::env::var(DEFAULT_CHARSET_ENV) {
            options.default_charset = label
                .parse()
                .map_err(|e| ResponseError::Config(format!("{DEFAULT_CHARSET_ENV}: {e}")))?;
        }

        if let Ok(value) = std::env::var(DRAIN_ON_DISPOSE_ENV) {
            options.drain_on_dispose = value.trim().parse().map_err(|_| {
                ResponseError::Config(format!(
                    "{DRAIN_ON_DISPOSE_ENV}: expected true or false, got '{value}'"
                ))
            })?;
        }

        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ResponseOptions::default();
        assert_eq!(options.default_charset, Charset::Utf8);
        assert!(options.drain_on_dispose);
    }

    #[test]
    fn test_builder_methods() {
        let options = ResponseOptions::default()
            .with_default_charset(Charset::Latin1)
            .with_drain_on_dispose(false);
        assert_eq!(options.default_charset, Charset::Latin1);
        assert!(!options.drain_on_dispose);
    }

    #[test]
    fn test_from_env_unset_uses_defaults() {
        temp_env::with_vars_unset([DEFAULT_CHARSET_ENV, DRAIN_ON_DISPOSE_ENV], || {
            assert_eq!(ResponseOptions::from_env().unwrap(), ResponseOptions::default());
        });
    }

    #[test]
    fn test_from_env_reads_values() {
        temp_env::with_vars(
            [
                (DEFAULT_CHARSET_ENV, Some("ISO-8859-1")),
                (DRAIN_ON_DISPOSE_ENV, Some("false")),
            ],
            || {
                let options = ResponseOptions::from_env().unwrap();
                assert_eq!(options.default_charset, Charset::Latin1);
                assert!(!options.drain_on_dispose);
            },
        );
    }

    #[test]
    fn test_from_env_rejects_unknown_charset() {
        temp_env::with_var(DEFAULT_CHARSET_ENV, Some("ebcdic"), || {
            let err = ResponseOptions::from_env().unwrap_err();
            assert!(matches!(err, ResponseError::Config(ref msg) if msg.contains("ebcdic")));
        });
    }

    #[test]
    fn test_from_env_rejects_bad_bool() {
        temp_env::with_vars(
            [
                (DEFAULT_CHARSET_ENV, None::<&str>),
                (DRAIN_ON_DISPOSE_ENV, Some("sometimes")),
            ],
            || {
                let err = ResponseOptions::from_env().unwrap_err();
                assert!(matches!(err, ResponseError::Config(_)));
            },
        );
    }
}
