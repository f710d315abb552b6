//! REST response adapter
//!
//! Wraps an HTTP response from a blocking or async transport and exposes its
//! body as bytes, text, or JSON while reading the underlying content stream
//! at most once:
//!
//! - Header and status snapshot taken at construction
//! - Body materialized on first access, shared by every later accessor
//! - Text and JSON views memoized independently
//! - Raw stream escape hatch for callers that want to read the body themselves
//! - Unread streams released on `dispose()` or drop
//!
//! # Examples
//!
//! ## Blocking transport
//!
//! ```no_run
//! use rest_response::RestResponse;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let raw = reqwest::blocking::get("http://localhost:8080/v1/accounts")?;
//! let response = RestResponse::from_blocking(raw);
//!
//! if response.is_success() {
//!     let accounts = response.json_array()?;
//!     println!("{} accounts", accounts.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Async transport
//!
//! ```no_run
//! use rest_response::RestResponse;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let raw = reqwest::get("http://localhost:8080/v1/accounts/42").await?;
//! let response = RestResponse::from_async(raw).await?;
//!
//! let account = response.json_object()?;
//! println!("name: {}", account["name"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Streaming the body directly
//!
//! ```no_run
//! use rest_response::RestResponse;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let raw = reqwest::blocking::get("http://localhost:8080/export.csv")?;
//! let response = RestResponse::from_blocking(raw);
//!
//! if let Some(mut stream) = response.raw_stream() {
//!     let mut sink = std::io::sink();
//!     std::io::copy(&mut stream, &mut sink)?;
//! }
//! // Buffered accessors now see an empty body.
//! assert!(response.bytes()?.is_empty());
//! # Ok(())
//! # }
//! ```

mod body;
mod charset;
mod config;
mod error;
mod headers;
mod response;
mod transport;

// Re-export public API
pub use body::{ContentStream, ResponseEntity};
pub use charset::Charset;
pub use config::ResponseOptions;
pub use error::{DecodeError, ResponseError, StreamAlreadyConsumed};
pub use headers::Headers;
pub use response::{RestResponse, is_success};

// Re-export commonly used types from dependencies
pub use bytes::Bytes;
pub use serde_json::{Map, Value};
