use bytes::Bytes;
use std::io::{self, Read};

use crate::error::StreamAlreadyConsumed;

/// One-shot readable content of a response body
pub type ContentStream = Box<dyn Read + Send + 'static>;

/// Body entity handed over by a blocking transport: the live content stream
/// plus the charset the transport declared for it.
pub struct ResponseEntity {
    content: ContentStream,
    charset: Option<String>,
}

impl std::fmt::Debug for ResponseEntity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseEntity")
            .field("charset", &self.charset)
            .finish_non_exhaustive()
    }
}

impl ResponseEntity {
    /// Wrap a readable content stream with no declared charset
    #[must_use]
    pub fn new(content: impl Read + Send + 'static) -> Self {
        Self {
            content: Box::new(content),
            charset: None,
        }
    }

    /// Attach the charset label declared by the transport
    #[must_use]
    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }

    #[must_use]
    pub fn charset(&self) -> Option<&str> {
        self.charset.as_deref()
    }
}

/// Who currently owns the content stream.
pub enum BodySource {
    /// Still owned by the adapter. `partial` keeps whatever an interrupted
    /// read already pulled off the stream, so a retry resumes instead of
    /// re-reading.
    Stream {
        content: ContentStream,
        charset: Option<String>,
        partial: Vec<u8>,
    },
    /// Drained, escaped, disposed, or never present.
    Released,
}

impl std::fmt::Debug for BodySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BodySource::Stream { partial, .. } => f
                .debug_struct("BodySource::Stream")
                .field("partial", &partial.len())
                .finish_non_exhaustive(),
            BodySource::Released => write!(f, "BodySource::Released"),
        }
    }
}

/// Outcome of draining a stream source.
pub enum Drained {
    Body(MaterializedBody),
    AlreadyConsumed,
}

impl BodySource {
    pub fn from_entity(entity: Option<ResponseEntity>) -> Self {
        match entity {
            Some(ResponseEntity { content, charset }) => BodySource::Stream {
                content,
                charset,
                partial: Vec::new(),
            },
            None => BodySource::Released,
        }
    }

    /// Read the remaining stream into an owned body and release it.
    ///
    /// On a genuine I/O failure the stream stays in place with the bytes
    /// read so far, and the error is returned.
    pub fn drain(&mut self) -> io::Result<Drained> {
        let BodySource::Stream {
            content, partial, ..
        } = self
        else {
            return Ok(Drained::AlreadyConsumed);
        };

        match content.read_to_end(partial) {
            Ok(_) => {}
            Err(e) if StreamAlreadyConsumed::is_cause_of(&e) => {
                *self = BodySource::Released;
                return Ok(Drained::AlreadyConsumed);
            }
            Err(e) => return Err(e),
        }

        match std::mem::replace(self, BodySource::Released) {
            BodySource::Stream {
                charset, partial, ..
            } => Ok(Drained::Body(MaterializedBody {
                bytes: Bytes::from(partial),
                charset,
            })),
            BodySource::Released => Ok(Drained::AlreadyConsumed),
        }
    }

    /// Take the stream out, leaving the source released.
    ///
    /// Bytes already pulled off by an interrupted read are put back in front
    /// of the remaining stream.
    pub fn take(&mut self) -> Option<ContentStream> {
        match std::mem::replace(self, BodySource::Released) {
            BodySource::Stream {
                content, partial, ..
            } if partial.is_empty() => Some(content),
            BodySource::Stream {
                content, partial, ..
            } => Some(Box::new(io::Cursor::new(partial).chain(content))),
            BodySource::Released => None,
        }
    }
}

/// Body bytes owned by the adapter, fixed once set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializedBody {
    pub bytes: Bytes,
    pub charset: Option<String>,
}

impl MaterializedBody {
    pub fn empty() -> Self {
        Self::default()
    }
}
