use std::fmt;

use crate::body::Body;
use crate::escape::Platform;
use crate::request::{normalize, CanonicalRequest, RawRequest};

const CURL: &str = "curl";
const COMPRESSED: &str = "--compressed";
const DATA: &str = "--data";
const DATA_BINARY: &str = "--data-binary";
/// Content types whose bodies go out with `--data` instead of `--data-binary`.
const TEXT_DATA: [&str; 2] = ["application/x-www-form-urlencoded", "application/json"];
/// curl derives these from the url (except `version`) and would send them anyway.
const DERIVED_HEADERS: [&str; 5] = ["host", "method", "path", "scheme", "version"];
const CONTENT_LENGTH: &str = "content-length";

/// Turns requests into curl command lines for one target shell.
///
/// # Example
///
/// ```rust
/// use request_as_curl::{CommandBuilder, Platform, RawRequest};
/// let raw = RawRequest::Plain {
///   method: Some("PUT".to_string()),
///   url: Some("/p".to_string()),
///   headers: Some([("host", "h")].into_iter().collect()),
/// };
/// let command = CommandBuilder::new()
///   .platform(Platform::Posix)
///   .serialize(&raw, None);
/// assert_eq!(command, "curl 'http://h/p' -X PUT --compressed");
/// ```
#[must_use]
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandBuilder {
  platform: Platform,
}

impl CommandBuilder {
  /// Constructs a `CommandBuilder` for the platform this process runs on.
  pub fn new() -> CommandBuilder {
    CommandBuilder::default()
  }
  /// Sets the shell the command is escaped for.
  pub fn platform(mut self, platform: Platform) -> CommandBuilder {
    self.platform = platform;
    self
  }
  /// Normalizes `raw` with `body` and builds the command.
  pub fn serialize(&self, raw: &RawRequest, body: Option<Body>) -> String {
    self.build(&normalize(raw, body))
  }
  /// Builds the command for an `http::Request`, its own body included.
  pub fn build_http<B: AsRef<[u8]>>(&self, req: &http::Request<B>) -> String {
    let body = req.body().as_ref();
    let body = if body.is_empty() {
      None
    } else {
      Some(Body::from(body.to_vec()))
    };
    self.serialize(&RawRequest::from(req), body)
  }
  /// Builds the command for a canonical request.
  pub fn build(&self, req: &CanonicalRequest) -> String {
    self.tokens(req).join(" ")
  }
  /// The command as separate, already escaped, tokens.
  pub fn tokens(&self, req: &CanonicalRequest) -> Vec<String> {
    let mut command = vec![CURL.to_string()];
    command.push(self.url(req));

    let data = self.data(req);
    let inferred_method = if data.is_some() { "POST" } else { "GET" };
    if req.method != inferred_method {
      command.push("-X".to_string());
      command.push(req.method.clone());
    }
    tracing::debug!(method = %req.method, inferred_method, "method");

    let ignore_content_length = data.is_some();
    for (name, value) in req.headers.iter() {
      // SPDY/HTTP2 pseudo headers
      let name = name.strip_prefix(':').unwrap_or(name);
      let lower = name.to_lowercase();
      if DERIVED_HEADERS.contains(&lower.as_str())
        || (ignore_content_length && lower == CONTENT_LENGTH)
      {
        tracing::trace!(header = name, "skip");
        continue;
      }
      command.push("-H".to_string());
      command.push(self.platform.escape(&format!("{name}: {value}")));
    }

    if let Some((flag, body)) = data {
      command.push(flag.to_string());
      command.push(body);
    }
    command.push(COMPRESSED.to_string());
    command
  }

  fn url(&self, req: &CanonicalRequest) -> String {
    let host = req
      .headers
      .get("host")
      .filter(|h| !h.is_empty())
      .unwrap_or("localhost");
    let scheme = if host.ends_with("443") { "https" } else { "http" };
    let url = format!("{scheme}://{host}{}", req.url.as_deref().unwrap_or_default());
    let escaped = self.platform.escape(&url);
    let mut token = String::with_capacity(escaped.len());
    for c in escaped.chars() {
      if matches!(c, '[' | '{' | '}' | ']') {
        token.push('\\');
      }
      token.push(c);
    }
    token
  }

  fn data(&self, req: &CanonicalRequest) -> Option<(&'static str, String)> {
    let body = req.body.as_ref()?.to_text()?;
    let text_data = req
      .headers
      .get("content-type")
      .is_some_and(|ct| TEXT_DATA.iter().any(|t| ct.starts_with(t)));
    let flag = if text_data { DATA } else { DATA_BINARY };
    Some((flag, self.platform.escape(&body)))
  }
}

/// curl command
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandRecord {
  /// curl command
  pub command: String,
}

impl From<&CanonicalRequest> for CommandRecord {
  fn from(value: &CanonicalRequest) -> Self {
    CommandRecord {
      command: CommandBuilder::new().build(value),
    }
  }
}

impl fmt::Display for CommandRecord {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.command)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::Headers;
  use serde_json::json;

  fn posix() -> CommandBuilder {
    CommandBuilder::new().platform(Platform::Posix)
  }

  fn request(method: &str, url: Option<&str>, headers: &[(&str, &str)], body: Option<Body>) -> CanonicalRequest {
    CanonicalRequest {
      method: method.to_string(),
      url: url.map(str::to_string),
      headers: headers.iter().copied().collect(),
      body,
    }
  }

  #[test]
  fn empty() {
    assert_eq!(
      posix().build(&CanonicalRequest::default()),
      "curl 'http://localhost' --compressed"
    );
  }

  #[test]
  fn path_only() {
    let req = request("GET", Some("/x"), &[], None);
    assert_eq!(posix().build(&req), "curl 'http://localhost/x' --compressed");
  }

  #[test]
  fn https_from_port() {
    let req = request("GET", None, &[("host", "localhost:443")], None);
    assert_eq!(posix().build(&req), "curl 'https://localhost:443' --compressed");
  }

  #[test]
  fn json_post_infers_method() {
    let req = request(
      "POST",
      Some("/p"),
      &[("host", "localhost:54321"), ("content-type", "application/json")],
      Some(Body::from(json!({"a": 1}))),
    );
    assert_eq!(
      posix().tokens(&req),
      vec![
        "curl",
        "'http://localhost:54321/p'",
        "-H",
        "'content-type: application/json'",
        "--data",
        "'{\"a\":1}'",
        "--compressed",
      ]
    );
  }

  #[test]
  fn explicit_method() {
    let req = request("PUT", Some("/p"), &[("host", "h")], None);
    assert_eq!(posix().build(&req), "curl 'http://h/p' -X PUT --compressed");
    let req = request("GET", Some("/p"), &[], Some(Body::from("x")));
    assert_eq!(
      posix().build(&req),
      "curl 'http://localhost/p' -X GET --data-binary 'x' --compressed"
    );
  }

  #[test]
  fn derived_headers_are_dropped() {
    let req = request(
      "POST",
      Some("/"),
      &[
        ("Host", "h"),
        (":method", "POST"),
        (":path", "/"),
        (":scheme", "http"),
        ("Version", "HTTP/1.1"),
        ("Content-Length", "4"),
        (":authority", "h"),
        ("X-Keep", "1"),
      ],
      Some(Body::from("data")),
    );
    assert_eq!(
      posix().build(&req),
      "curl 'http://h/' -H 'authority: h' -H 'X-Keep: 1' --data-binary 'data' --compressed"
    );
  }

  #[test]
  fn stale_content_length_without_body() {
    let req = request("GET", Some("/"), &[("content-length", "10")], None);
    assert_eq!(
      posix().build(&req),
      "curl 'http://localhost/' -H 'content-length: 10' --compressed"
    );
  }

  #[test]
  fn form_and_binary_data() {
    let form = request(
      "POST",
      None,
      &[("Content-Type", "application/x-www-form-urlencoded; charset=utf-8")],
      Some(Body::from("a=1&b=2")),
    );
    assert_eq!(
      posix().build(&form),
      "curl 'http://localhost' -H 'Content-Type: application/x-www-form-urlencoded; charset=utf-8' --data 'a=1&b=2' --compressed"
    );
    let binary = request("POST", None, &[], Some(Body::from(vec![0x7f, b'E', 0x00])));
    assert_eq!(
      posix().build(&binary),
      "curl 'http://localhost' --data-binary $'\\x7fE\\x00' --compressed"
    );
  }

  #[test]
  fn empty_body_is_no_body() {
    let req = request("POST", None, &[], Some(Body::from("")));
    assert_eq!(posix().build(&req), "curl 'http://localhost' -X POST --compressed");
  }

  #[test]
  fn url_globbing_chars() {
    let req = request("GET", Some("/a[0]?q={x}"), &[], None);
    assert_eq!(
      posix().build(&req),
      "curl 'http://localhost/a\\[0\\]?q=\\{x\\}' --compressed"
    );
  }

  #[test]
  fn header_order_and_case() {
    let mut headers = Headers::new();
    headers.insert("Z-Last", "z");
    headers.insert("a-first", "it's");
    let req = CanonicalRequest {
      headers,
      ..CanonicalRequest::default()
    };
    assert_eq!(
      posix().build(&req),
      "curl 'http://localhost' -H 'Z-Last: z' -H $'a-first: it\\'s' --compressed"
    );
  }

  #[test]
  fn windows() {
    let builder = CommandBuilder::new().platform(Platform::Windows);
    let req = request(
      "POST",
      Some("/p?x=%41"),
      &[("host", "h"), ("content-type", "application/json")],
      Some(Body::from("{\"k\":\"a\\nb\"}")),
    );
    assert_eq!(
      builder.build(&req),
      "curl \"http://h/p?x=\"%\"41\" -H \"content-type: application/json\" --data \"{\"\"k\"\":\"\"a\\\\nb\"\"}\" --compressed"
    );
  }

  #[test]
  fn record() {
    let record = CommandRecord::from(&CanonicalRequest::default());
    assert_eq!(record.to_string(), record.command);
    assert!(record.command.starts_with("curl "));
  }
}
