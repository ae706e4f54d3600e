use std::fmt;

use http::HeaderMap;
use indexmap::IndexMap;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An insertion-ordered header mapping.
///
/// Names keep whatever casing they were inserted with. Inserting a name
/// that is already present replaces its value in place, so the original
/// position is kept. [`Headers::get`] ignores case.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Headers {
  entries: IndexMap<String, String>,
}

impl Headers {
  /// Creates an empty mapping.
  pub fn new() -> Headers {
    Headers::default()
  }
  /// Sets `name` to `value`, overwriting an entry with exactly the same name.
  pub fn insert<K: Into<String>, V: Into<String>>(&mut self, name: K, value: V) {
    self.entries.insert(name.into(), value.into());
  }
  /// Case-insensitive lookup.
  ///
  /// An entry whose name is already lower-case wins over a differently
  /// cased one, otherwise the first match is returned.
  pub fn get(&self, name: &str) -> Option<&str> {
    self
      .entries
      .get(name.to_ascii_lowercase().as_str())
      .or_else(|| {
        self
          .entries
          .iter()
          .find(|(k, _)| k.eq_ignore_ascii_case(name))
          .map(|(_, v)| v)
      })
      .map(String::as_str)
  }
  /// Iterates in insertion order.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
  }
  /// Number of entries.
  pub fn len(&self) -> usize {
    self.entries.len()
  }
  /// True when there are no entries.
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
  /// Parses a serialized header section.
  ///
  /// `block` is the head of a request as it goes on the wire:
  /// `POST / HTTP/1.1\r\nHost: localhost\r\n\r\n`. The request line and the
  /// two trailing empty pieces of the terminator are skipped. Each line is
  /// split on the first `:`, both halves trimmed and the name lower-cased.
  pub fn from_block(block: &str) -> Headers {
    let lines: Vec<&str> = block.split("\r\n").collect();
    let mut headers = Headers::new();
    if lines.len() < 3 {
      return headers;
    }
    for line in &lines[1..lines.len() - 2] {
      let (name, value) = line.split_once(':').unwrap_or((line, ""));
      headers.insert(name.trim().to_lowercase(), value.trim());
    }
    headers
  }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Headers {
  fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
    let mut headers = Headers::new();
    for (k, v) in iter {
      headers.insert(k, v);
    }
    headers
  }
}

impl From<&HeaderMap> for Headers {
  /// Repeated names are folded into one comma separated value.
  fn from(map: &HeaderMap) -> Self {
    let mut headers = Headers::new();
    for name in map.keys() {
      let value = map
        .get_all(name)
        .iter()
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .collect::<Vec<_>>()
        .join(", ");
      headers.insert(name.as_str(), value);
    }
    headers
  }
}

impl Serialize for Headers {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    self.entries.serialize(serializer)
  }
}

impl<'de> Deserialize<'de> for Headers {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    deserializer.deserialize_map(HeadersVisitor)
  }
}

struct HeadersVisitor;

impl<'de> Visitor<'de> for HeadersVisitor {
  type Value = Headers;

  fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str("a map of header names to values")
  }

  fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
  where
    A: MapAccess<'de>,
  {
    let mut headers = Headers {
      entries: IndexMap::with_capacity(access.size_hint().unwrap_or_default()),
    };
    while let Some((name, value)) = access.next_entry::<String, serde_json::Value>()? {
      let value = match value {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
      };
      headers.insert(name, value);
    }
    Ok(headers)
  }
}
