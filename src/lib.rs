#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # request-as-curl
//!
//! Serializes an outgoing HTTP request as a [curl(1)] command line, so a
//! call made from inside a process can be replayed from a terminal.
//!
//! - Shell escaping for POSIX shells and cmd.exe, see [`Platform`]
//! - Several request shapes, see [`RawRequest`]
//! - Scheme and method inference, derived headers left to curl
//!
//! ## Serializing a request
//!
//! ```rust
//! use request_as_curl::{Body, CommandBuilder, Platform, RawRequest};
//! let raw = RawRequest::Plain {
//!   method: Some("POST".to_string()),
//!   url: Some("/p".to_string()),
//!   headers: Some(
//!     [("host", "localhost:54321"), ("content-type", "application/json")]
//!       .into_iter()
//!       .collect(),
//!   ),
//! };
//! let body = Body::from(serde_json::json!({"a": 1}));
//! let command = CommandBuilder::new()
//!   .platform(Platform::Posix)
//!   .serialize(&raw, Some(body));
//! assert_eq!(
//!   command,
//!   r#"curl 'http://localhost:54321/p' -H 'content-type: application/json' --data '{"a":1}' --compressed"#
//! );
//! ```
//!
//! [`serialize`] does the same for the shell of the platform the crate was
//! built for.
//!
//! ## From a raw message
//!
//! ```rust
//! # fn run() -> request_as_curl::Result<()> {
//! let (raw, body) = request_as_curl::RawRequest::parse_http(
//!   "DELETE /item/1 HTTP/1.1\r\nHost: example.com:443\r\n\r\n",
//! )?;
//! println!("{}", request_as_curl::serialize(&raw, body));
//! # Ok(())
//! # }
//! ```
//!
//! ## Optional Features
//!
//! - **cli**: Builds the `request-as-curl` binary.
//!
//! [curl(1)]: https://curl.se/docs/manpage.html
mod body;
mod errors;
/// Shell escaping
pub mod escape;
mod headers;
/// Command building
pub mod record;
mod request;

pub use body::Body;
pub use errors::{Error, Result};
pub use escape::Platform;
pub use headers::Headers;
pub use record::{CommandBuilder, CommandRecord};
pub use request::{normalize, CanonicalRequest, RawRequest, DEFAULT_METHOD};

/// Shortcut to serialize a request for the current platform's shell.
///
/// See [`CommandBuilder`] to pick another shell.
///
/// # Examples
///
/// ```rust
/// let command = request_as_curl::serialize(&Default::default(), None);
/// # if cfg!(not(windows)) {
/// assert_eq!(command, "curl 'http://localhost' --compressed");
/// # }
/// ```
pub fn serialize(request: &RawRequest, body: Option<Body>) -> String {
  CommandBuilder::new().serialize(request, body)
}

pub(crate) const CR_LF: &[u8] = &[13, 10];
