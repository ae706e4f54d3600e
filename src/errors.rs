//! request-as-curl error
use thiserror::Error as ThisError;
/// A `Result` alias where the `Err` case is `request_as_curl::Error`.
pub type Result<T> = std::result::Result<T, Error>;
/// The Errors that may occur around serializing a request.
///
/// Escaping and command building never fail; these come from the edges
/// (reading input, parsing raw messages, encoding JSON bodies).
#[derive(ThisError, Debug)]
pub enum Error {
  /// Error
  #[error(transparent)]
  IO(#[from] std::io::Error),
  /// serde_json::Error
  #[error(transparent)]
  Json(#[from] serde_json::Error),
  /// The raw message does not start with `METHOD TARGET`
  #[error("invalid request line: {0:?}")]
  InvalidRequestLine(String),
  /// Unknown Error
  #[error("{0}")]
  Other(String),
}

pub(crate) fn new_invalid_request_line(line: &str) -> Error {
  Error::InvalidRequestLine(line.to_string())
}
