use std::fmt;
use std::io;
use std::sync::OnceLock;

use bytes::Bytes;
use http::StatusCode;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, error, warn};

use crate::body::{BodySource, ContentStream, Drained, MaterializedBody, ResponseEntity};
use crate::charset::Charset;
use crate::config::ResponseOptions;
use crate::error::ResponseError;
use crate::headers::Headers;

/// True for 2xx status codes
#[must_use]
pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Which transport path produced the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    /// Blocking transport; body read from a content stream on demand.
    Stream,
    /// Transport buffered the whole body itself.
    Buffered,
}

/// REST response whose body is read from the transport at most once and
/// exposed as bytes, text, or JSON.
///
/// The body is materialized on first access by any of [`bytes`](Self::bytes),
/// [`text`](Self::text), [`json_object`](Self::json_object) or
/// [`json_array`](Self::json_array). Views derived from it are computed once
/// and cached. [`raw_stream`](Self::raw_stream) hands the content stream to
/// the caller instead; buffered accessors then see an empty body.
///
/// A stream that was never consumed is released by [`dispose`](Self::dispose)
/// or on drop.
pub struct RestResponse {
    origin: Origin,
    status: u16,
    headers: Headers,
    options: ResponseOptions,
    source: Mutex<BodySource>,
    body: OnceLock<MaterializedBody>,
    text: OnceLock<String>,
    json_object: OnceLock<Map<String, Value>>,
    json_array: OnceLock<Vec<Value>>,
}

impl fmt::Debug for RestResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestResponse")
            .field("origin", &self.origin)
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("options", &self.options)
            .field("source", &*self.source.lock())
            .field("body_len", &self.body.get().map(|b| b.bytes.len()))
            .field("text_cached", &self.text.get().is_some())
            .field("json_object_cached", &self.json_object.get().is_some())
            .field("json_array_cached", &self.json_array.get().is_some())
            .finish()
    }
}

impl RestResponse {
    fn with_parts(
        origin: Origin,
        status: u16,
        headers: Headers,
        options: ResponseOptions,
        source: BodySource,
        body: Option<MaterializedBody>,
    ) -> Self {
        Self {
            origin,
            status,
            headers,
            options,
            source: Mutex::new(source),
            body: body.map_or_else(OnceLock::new, OnceLock::from),
            text: OnceLock::new(),
            json_object: OnceLock::new(),
            json_array: OnceLock::new(),
        }
    }

    /// Create a stream-backed response; the body is not touched until accessed
    #[must_use]
    pub fn from_stream(status: u16, headers: Headers, entity: Option<ResponseEntity>) -> Self {
        Self::from_stream_with_options(status, headers, entity, ResponseOptions::default())
    }

    /// Create a stream-backed response with custom options
    #[must_use]
    pub fn from_stream_with_options(
        status: u16,
        headers: Headers,
        entity: Option<ResponseEntity>,
        options: ResponseOptions,
    ) -> Self {
        Self::with_parts(
            Origin::Stream,
            status,
            headers,
            options,
            BodySource::from_entity(entity),
            None,
        )
    }

    /// Create a response from a body the transport already buffered
    #[must_use]
    pub fn from_bytes(status: u16, headers: Headers, body: impl Into<Bytes>) -> Self {
        Self::from_bytes_with_options(status, headers, body, None, ResponseOptions::default())
    }

    /// Create a buffered response that keeps the charset the transport declared
    #[must_use]
    pub fn from_bytes_with_charset(
        status: u16,
        headers: Headers,
        body: impl Into<Bytes>,
        charset: impl Into<String>,
    ) -> Self {
        Self::from_bytes_with_options(
            status,
            headers,
            body,
            Some(charset.into()),
            ResponseOptions::default(),
        )
    }

    /// Create a buffered response with custom options
    #[must_use]
    pub fn from_bytes_with_options(
        status: u16,
        headers: Headers,
        body: impl Into<Bytes>,
        charset: Option<String>,
        options: ResponseOptions,
    ) -> Self {
        let body = MaterializedBody {
            bytes: body.into(),
            charset,
        };
        Self::with_parts(
            Origin::Buffered,
            status,
            headers,
            options,
            BodySource::Released,
            Some(body),
        )
    }

    /// Get the HTTP status code
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Get the response headers
    #[must_use]
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Get a header value by its exact name
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Value of the `Content-Type` header, matching the name case-insensitively
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get("Content-Type")
            .or_else(|| {
                self.headers
                    .iter()
                    .find(|(name, _)| name.eq_ignore_ascii_case("content-type"))
                    .map(|(_, value)| value)
            })
    }

    /// True for 2xx responses
    #[must_use]
    pub fn is_success(&self) -> bool {
        is_success(self.status)
    }

    /// Fully read the content stream into an owned buffer and release it.
    ///
    /// Idempotent. A stream that turns out to be already consumed yields an
    /// empty body rather than an error.
    ///
    /// # Errors
    /// Returns [`ResponseError::Io`] when reading the stream fails. The body
    /// stays unset and a later call resumes the read.
    pub fn consume(&self) -> Result<(), ResponseError> {
        self.materialize().map(|_| ())
    }

    /// Like [`consume`](Self::consume), logging instead of returning errors
    pub fn consume_quietly(&self) {
        if let Err(e) = self.consume() {
            error!(status = self.status, error = %e, "Response content could not be read");
        }
    }

    fn materialize(&self) -> Result<&MaterializedBody, ResponseError> {
        if let Some(body) = self.body.get() {
            return Ok(body);
        }

        let mut source = self.source.lock();
        // Another caller may have finished while we waited for the lock.
        if let Some(body) = self.body.get() {
            return Ok(body);
        }

        let body = match source.drain()? {
            Drained::Body(body) => {
                debug!(status = self.status, len = body.bytes.len(), "Response content consumed");
                body
            }
            Drained::AlreadyConsumed => {
                warn!(status = self.status, "Response content has already been consumed");
                MaterializedBody::empty()
            }
        };
        Ok(self.body.get_or_init(|| body))
    }

    /// Consume the response and return the entire body as bytes
    ///
    /// Every call returns the same buffer.
    ///
    /// # Errors
    /// Returns [`ResponseError::Io`] when the content stream fails mid-read.
    pub fn bytes(&self) -> Result<&Bytes, ResponseError> {
        self.materialize().map(|body| &body.bytes)
    }

    /// Charset the body is decoded with: the declared one, else the default
    fn charset(&self, body: &MaterializedBody) -> Result<Charset, ResponseError> {
        match body.charset.as_deref() {
            Some(label) => label.parse(),
            None => Ok(self.options.default_charset),
        }
    }

    /// Return the body as a string, decoding it on the first call
    ///
    /// # Errors
    /// Returns [`ResponseError::Io`] if consumption fails,
    /// [`ResponseError::UnsupportedCharset`] for an unknown declared charset,
    /// and [`ResponseError::Decode`] when the bytes are invalid for the
    /// charset. Failed decodes are not cached.
    pub fn text(&self) -> Result<&str, ResponseError> {
        if let Some(text) = self.text.get() {
            return Ok(text);
        }
        let body = self.materialize()?;
        let decoded = self.charset(body)?.decode(&body.bytes)?;
        Ok(self.text.get_or_init(|| decoded))
    }

    /// Parse the body as a JSON object, on the first call only
    ///
    /// # Errors
    /// Propagates [`text`](Self::text) errors; returns
    /// [`ResponseError::Parse`] when the body is not a JSON object.
    pub fn json_object(&self) -> Result<&Map<String, Value>, ResponseError> {
        if let Some(object) = self.json_object.get() {
            return Ok(object);
        }
        let parsed: Map<String, Value> = serde_json::from_str(self.text()?)?;
        Ok(self.json_object.get_or_init(|| parsed))
    }

    /// Parse the body as a JSON array, on the first call only
    ///
    /// # Errors
    /// Propagates [`text`](Self::text) errors; returns
    /// [`ResponseError::Parse`] when the body is not a JSON array.
    pub fn json_array(&self) -> Result<&[Value], ResponseError> {
        if let Some(array) = self.json_array.get() {
            return Ok(array);
        }
        let parsed: Vec<Value> = serde_json::from_str(self.text()?)?;
        Ok(self.json_array.get_or_init(|| parsed))
    }

    /// Deserialize the body into `T`. Not cached.
    ///
    /// # Errors
    /// Returns [`ResponseError::Io`] if consumption fails and
    /// [`ResponseError::Parse`] if the body does not deserialize into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ResponseError> {
        let bytes = self.bytes()?;
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Take the live content stream for direct reading.
    ///
    /// The caller becomes responsible for reading or dropping it. The body is
    /// marked empty, so later buffered access sees no content. Returns `None`
    /// when the stream was already consumed, taken, or never existed.
    pub fn raw_stream(&self) -> Option<ContentStream> {
        let mut source = self.source.lock();
        let stream = source.take();
        // An already materialized body is left as is.
        self.body.get_or_init(MaterializedBody::empty);
        if stream.is_none() {
            warn!(status = self.status, "Response content has already been consumed");
        }
        stream
    }

    /// Read any unread content into the body and release the stream.
    ///
    /// Same as [`consume_quietly`](Self::consume_quietly): the body stays
    /// available afterwards and failures are logged, never returned. With
    /// `drain_on_dispose` off, or when the read fails, the stream is dropped
    /// instead and the body becomes empty. Idempotent.
    pub fn dispose(&self) {
        if self.options.drain_on_dispose {
            match self.consume() {
                Ok(()) => return,
                Err(e) => {
                    debug!(status = self.status, error = %e, "Response content could not be drained");
                }
            }
        }
        self.release(false);
    }

    /// Give up the stream without keeping its content.
    ///
    /// The source lock is held until the body is set, so readers never see a
    /// released source with no body.
    fn release(&self, drain: bool) {
        let mut source = self.source.lock();
        let Some(mut stream) = source.take() else {
            return;
        };
        self.body.get_or_init(MaterializedBody::empty);
        drop(source);

        if drain {
            match io::copy(&mut stream, &mut io::sink()) {
                Ok(discarded) => {
                    debug!(status = self.status, discarded, "Discarded unread response content");
                }
                Err(e) => {
                    debug!(status = self.status, error = %e, "Response content was already closed");
                }
            }
        }
    }
}

impl Drop for RestResponse {
    fn drop(&mut self) {
        // Nobody can read the body any more, so drain to nowhere.
        self.release(self.options.drain_on_dispose);
    }
}

/// Best-effort text view of the body.
///
/// Falls back to the status line for stream-backed responses, or nothing for
/// buffered ones, when the body cannot be read or decoded.
impl fmt::Display for RestResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.text() {
            Ok(text) => f.write_str(text),
            Err(e) => {
                error!(status = self.status, error = %e, "Could not render response as text");
                if self.origin == Origin::Stream {
                    let reason = StatusCode::from_u16(self.status)
                        .ok()
                        .and_then(|s| s.canonical_reason())
                        .unwrap_or_default();
                    write!(f, "{} {}", self.status, reason)
                } else {
                    Ok(())
                }
            }
        }
    }
}
