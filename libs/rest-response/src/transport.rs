use bytes::Bytes;
use futures::{Stream, StreamExt, TryStreamExt};
use http::HeaderMap;
use std::io;

use crate::body::ResponseEntity;
use crate::config::ResponseOptions;
use crate::error::ResponseError;
use crate::headers::Headers;
use crate::response::RestResponse;

/// Charset parameter of the `Content-Type` header, if any
fn declared_charset(headers: &HeaderMap) -> Option<String> {
    headers
        .get(http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<mime::Mime>().ok())
        .and_then(|m| m.get_param(mime::CHARSET).map(|c| c.as_str().to_owned()))
}

impl RestResponse {
    /// Wrap a blocking transport response. The body stays on the wire until
    /// first accessed.
    #[must_use]
    pub fn from_blocking(response: reqwest::blocking::Response) -> Self {
        Self::from_blocking_with_options(response, ResponseOptions::default())
    }

    /// Wrap a blocking transport response with custom options
    #[must_use]
    pub fn from_blocking_with_options(
        response: reqwest::blocking::Response,
        options: ResponseOptions,
    ) -> Self {
        let status = response.status().as_u16();
        let headers = Headers::from(response.headers());
        let charset = declared_charset(response.headers());
        let mut entity = ResponseEntity::new(response);
        if let Some(charset) = charset {
            entity = entity.with_charset(charset);
        }
        Self::from_stream_with_options(status, headers, Some(entity), options)
    }

    /// Buffer an async transport response and wrap the result.
    ///
    /// # Errors
    /// Returns [`ResponseError::Io`] if the body stream fails.
    pub async fn from_async(response: reqwest::Response) -> Result<Self, ResponseError> {
        Self::from_async_with_options(response, ResponseOptions::default()).await
    }

    /// Buffer an async transport response with custom options
    ///
    /// # Errors
    /// Returns [`ResponseError::Io`] if the body stream fails.
    pub async fn from_async_with_options(
        response: reqwest::Response,
        options: ResponseOptions,
    ) -> Result<Self, ResponseError> {
        let status = response.status().as_u16();
        let header_map = response.headers().clone();
        let stream = response.bytes_stream().map_err(io::Error::other);
        Self::from_byte_stream_with_options(status, &header_map, stream, options).await
    }

    /// Buffer any byte stream into a pre-materialized response
    ///
    /// # Errors
    /// Returns [`ResponseError::Io`] with the first error the stream yields.
    pub async fn from_byte_stream<S, E>(
        status: u16,
        headers: &HeaderMap,
        stream: S,
    ) -> Result<Self, ResponseError>
    where
        S: Stream<Item = Result<Bytes, E>>,
        E: Into<io::Error>,
    {
        Self::from_byte_stream_with_options(status, headers, stream, ResponseOptions::default())
            .await
    }

    /// Buffer any byte stream into a pre-materialized response with custom options
    ///
    /// # Errors
    /// Returns [`ResponseError::Io`] with the first error the stream yields.
    pub async fn from_byte_stream_with_options<S, E>(
        status: u16,
        headers: &HeaderMap,
        stream: S,
        options: ResponseOptions,
    ) -> Result<Self, ResponseError>
    where
        S: Stream<Item = Result<Bytes, E>>,
        E: Into<io::Error>,
    {
        let mut stream = std::pin::pin!(stream);
        let mut buf = Vec::new();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| ResponseError::Io(e.into()))?;
            buf.extend_from_slice(&chunk);
        }
        tracing::debug!(status, len = buf.len(), "Buffered async response body");

        Ok(Self::from_bytes_with_options(
            status,
            Headers::from(headers),
            buf,
            declared_charset(headers),
            options,
        ))
    }
}
