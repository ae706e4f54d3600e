use std::borrow::Cow;
use std::fmt;

use bytes::Bytes;
use serde::Serialize;

/// A request body.
#[derive(Clone, PartialEq)]
pub enum Body {
  /// Text sent as is.
  Text(String),
  /// Raw bytes, possibly not UTF-8.
  Binary(Bytes),
  /// A structured value, sent as its JSON encoding.
  Json(serde_json::Value),
}

impl Body {
  /// Encodes `value` as a JSON body.
  ///
  /// # Errors
  ///
  /// Fails when `value`'s `Serialize` implementation fails or it has
  /// non-string map keys.
  pub fn json<T: Serialize + ?Sized>(value: &T) -> crate::Result<Body> {
    Ok(Body::Json(serde_json::to_value(value)?))
  }
  /// The text placed on the command line, `None` when the body is empty.
  ///
  /// Bytes that are not UTF-8 are mapped one to one onto U+0000..U+00FF so
  /// that escaping writes them back out as `\xHH`.
  pub fn to_text(&self) -> Option<Cow<'_, str>> {
    let text = match self {
      Body::Text(s) => Cow::Borrowed(s.as_str()),
      Body::Binary(b) => match std::str::from_utf8(b) {
        Ok(s) => Cow::Borrowed(s),
        Err(_) => Cow::Owned(b.iter().map(|&b| char::from(b)).collect()),
      },
      Body::Json(serde_json::Value::Null) => return None,
      Body::Json(serde_json::Value::String(s)) => Cow::Borrowed(s.as_str()),
      Body::Json(v) => Cow::Owned(v.to_string()),
    };
    if text.is_empty() {
      None
    } else {
      Some(text)
    }
  }
}

impl From<Bytes> for Body {
  #[inline]
  fn from(b: Bytes) -> Body {
    Body::Binary(b)
  }
}

impl From<String> for Body {
  #[inline]
  fn from(s: String) -> Body {
    Body::Text(s)
  }
}

impl From<&str> for Body {
  #[inline]
  fn from(s: &str) -> Body {
    Body::Text(s.to_string())
  }
}

impl From<&'static [u8]> for Body {
  #[inline]
  fn from(s: &'static [u8]) -> Body {
    Body::Binary(Bytes::from_static(s))
  }
}

impl From<Vec<u8>> for Body {
  #[inline]
  fn from(v: Vec<u8>) -> Body {
    Body::Binary(v.into())
  }
}

impl From<serde_json::Value> for Body {
  #[inline]
  fn from(v: serde_json::Value) -> Body {
    Body::Json(v)
  }
}

impl fmt::Debug for Body {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Body::Text(s) => f.debug_tuple("Text").field(s).finish(),
      Body::Binary(b) => f
        .debug_tuple("Binary")
        .field(&format_args!("{}", b.escape_ascii()))
        .finish(),
      Body::Json(v) => f.debug_tuple("Json").field(v).finish(),
    }
  }
}
