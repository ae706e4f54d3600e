use http::uri::Scheme;

use crate::body::Body;
use crate::errors::new_invalid_request_line;
use crate::headers::Headers;
use crate::CR_LF;

/// The method used when a request does not carry one.
pub const DEFAULT_METHOD: &str = "GET";

/// The request-like values that can be turned into a curl command.
///
/// Every field is optional; whatever is missing falls back to a default
/// during [`normalize`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(from = "RequestDocument")]
pub enum RawRequest {
  /// A request already on its way out, whose head has been serialized.
  HeaderBlock {
    /// method
    method: Option<String>,
    /// request target as written on the request line
    path: Option<String>,
    /// `METHOD TARGET VERSION\r\n` + header lines + `\r\n`
    block: Option<String>,
  },
  /// A request already on its way out, headers still kept as a mapping.
  HeadersMap {
    /// method
    method: Option<String>,
    /// request target
    path: Option<String>,
    /// headers
    headers: Option<Headers>,
  },
  /// A plain value with a url and headers.
  Plain {
    /// method
    method: Option<String>,
    /// url, usually just path and query
    url: Option<String>,
    /// headers
    headers: Option<Headers>,
  },
}

impl Default for RawRequest {
  fn default() -> Self {
    RawRequest::Plain {
      method: None,
      url: None,
      headers: None,
    }
  }
}

/// The one shape every [`RawRequest`] is reduced to.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalRequest {
  /// method, `GET` unless given
  pub method: String,
  /// path (and query) appended to `scheme://host`
  pub url: Option<String>,
  /// headers
  pub headers: Headers,
  /// body
  pub body: Option<Body>,
}

impl Default for CanonicalRequest {
  fn default() -> Self {
    CanonicalRequest {
      method: DEFAULT_METHOD.to_string(),
      url: None,
      headers: Headers::default(),
      body: None,
    }
  }
}

/// Reduces `raw` and `body` to a [`CanonicalRequest`].
///
/// `body` is taken as given; nothing is read from `raw` for it.
pub fn normalize(raw: &RawRequest, body: Option<Body>) -> CanonicalRequest {
  let (method, url, headers) = match raw {
    RawRequest::HeaderBlock {
      method,
      path,
      block,
    } => {
      tracing::debug!(has_block = block.is_some(), "normalize serialized header block");
      let headers = block.as_deref().map(Headers::from_block);
      (method, path, headers)
    }
    RawRequest::HeadersMap {
      method,
      path,
      headers,
    } => {
      tracing::debug!("normalize header map");
      (method, path, headers.clone())
    }
    RawRequest::Plain {
      method,
      url,
      headers,
    } => {
      tracing::debug!("normalize plain request");
      (method, url, headers.clone())
    }
  };
  CanonicalRequest {
    method: method.clone().unwrap_or_else(|| DEFAULT_METHOD.to_string()),
    url: url.clone(),
    headers: headers.unwrap_or_default(),
    body,
  }
}

impl RawRequest {
  /// Parses a complete HTTP/1.x request message.
  ///
  /// The head may use bare `\n` line endings, it is rewritten with `\r\n`.
  /// Everything after the empty line is the body.
  ///
  /// # Errors
  ///
  /// Fails when the first line is not at least `METHOD TARGET`.
  ///
  /// # Examples
  ///
  /// ```
  /// use request_as_curl::RawRequest;
  /// let (raw, body) = RawRequest::parse_http("PUT /x HTTP/1.1\r\nHost: h\r\n\r\nhi").unwrap();
  /// assert!(matches!(raw, RawRequest::HeaderBlock { .. }));
  /// assert!(body.is_some());
  /// ```
  pub fn parse_http<R: AsRef<[u8]>>(raw: R) -> crate::Result<(RawRequest, Option<Body>)> {
    let raw = raw.as_ref();
    let start = raw
      .iter()
      .position(|b| !CR_LF.contains(b))
      .unwrap_or(raw.len());
    let raw = &raw[start..];
    let (head, body) = match find_head_end(raw) {
      Some(end) => raw.split_at(end),
      None => (raw, &[][..]),
    };
    let head = String::from_utf8_lossy(head);
    let lines: Vec<&str> = head.lines().take_while(|l| !l.is_empty()).collect();
    let request_line = lines.first().copied().unwrap_or_default();
    let mut parts = request_line.split_whitespace();
    let (Some(method), Some(path)) = (parts.next(), parts.next()) else {
      return Err(new_invalid_request_line(request_line));
    };
    let mut block = lines.join("\r\n");
    block.push_str("\r\n\r\n");
    let body = if body.is_empty() {
      None
    } else {
      Some(Body::from(body.to_vec()))
    };
    tracing::debug!(method, path, header_lines = lines.len() - 1, "parsed raw request");
    Ok((
      RawRequest::HeaderBlock {
        method: Some(method.to_string()),
        path: Some(path.to_string()),
        block: Some(block),
      },
      body,
    ))
  }
  /// Parses a JSON request document.
  ///
  /// The document looks like `{"method": "POST", "url": "/p", "headers": {...},
  /// "body": ...}`. A `header_block` string selects
  /// [`RawRequest::HeaderBlock`], a `path` selects [`RawRequest::HeadersMap`].
  /// A string `body` is sent as text, anything else as JSON.
  ///
  /// # Errors
  ///
  /// Fails when `json` is not such a document.
  pub fn from_json(json: &str) -> crate::Result<(RawRequest, Option<Body>)> {
    let mut doc: RequestDocument = serde_json::from_str(json)?;
    let body = doc.body.take().map(|v| match v {
      serde_json::Value::String(s) => Body::Text(s),
      other => Body::Json(other),
    });
    Ok((RawRequest::from(doc), body))
  }
}

fn find_head_end(raw: &[u8]) -> Option<usize> {
  let crlf = raw.windows(4).position(|w| w == b"\r\n\r\n").map(|i| i + 4);
  let lf = raw.windows(2).position(|w| w == b"\n\n").map(|i| i + 2);
  match (crlf, lf) {
    (Some(a), Some(b)) => Some(a.min(b)),
    (a, b) => a.or(b),
  }
}

#[derive(serde::Deserialize)]
struct RequestDocument {
  method: Option<String>,
  url: Option<String>,
  path: Option<String>,
  headers: Option<Headers>,
  header_block: Option<String>,
  body: Option<serde_json::Value>,
}

impl From<RequestDocument> for RawRequest {
  fn from(doc: RequestDocument) -> Self {
    let RequestDocument {
      method,
      url,
      path,
      headers,
      header_block,
      ..
    } = doc;
    match (header_block, path) {
      (Some(block), path) => RawRequest::HeaderBlock {
        method,
        path: path.or(url),
        block: Some(block),
      },
      (None, Some(path)) => RawRequest::HeadersMap {
        method,
        path: Some(path),
        headers,
      },
      (None, None) => RawRequest::Plain {
        method,
        url,
        headers,
      },
    }
  }
}

impl<B> From<&http::Request<B>> for RawRequest {
  /// Builds [`RawRequest::HeadersMap`].
  ///
  /// Without a `host` header one is taken from the uri authority, with
  /// `:443` added for `https` uris that leave the port implicit.
  fn from(req: &http::Request<B>) -> Self {
    let uri = req.uri();
    let mut headers = Headers::from(req.headers());
    if headers.get(http::header::HOST.as_str()).is_none() {
      if let Some(authority) = uri.authority() {
        let host = match authority.port_u16() {
          Some(port) => format!("{}:{}", authority.host(), port),
          None if uri.scheme() == Some(&Scheme::HTTPS) => format!("{}:443", authority.host()),
          None => authority.host().to_string(),
        };
        headers.insert(http::header::HOST.as_str(), host);
      }
    }
    RawRequest::HeadersMap {
      method: Some(req.method().as_str().to_string()),
      path: uri.path_and_query().map(|p| p.as_str().to_string()),
      headers: Some(headers),
    }
  }
}
