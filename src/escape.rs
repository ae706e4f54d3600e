//! Shell escaping for a single command-line token.
//!
//! The target shell is chosen with [`Platform`]. It is a plain value, so a
//! caller that wants cmd.exe output on a unix host just asks for it.

/// The shell family a generated command is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Platform {
  /// sh, bash, zsh and friends
  Posix,
  /// cmd.exe
  Windows,
}

impl Default for Platform {
  fn default() -> Self {
    Platform::current()
  }
}

impl Platform {
  /// The platform this process was compiled for.
  pub const fn current() -> Platform {
    if cfg!(windows) {
      Platform::Windows
    } else {
      Platform::Posix
    }
  }
  /// Escapes `value` into one token that the target shell parses back
  /// to exactly `value`.
  ///
  /// # Examples
  ///
  /// ```
  /// use request_as_curl::Platform;
  /// assert_eq!(Platform::Posix.escape("a b"), "'a b'");
  /// assert_eq!(Platform::Posix.escape("it's"), r"$'it\'s'");
  /// assert_eq!(Platform::Windows.escape("100%"), r#""100"%"""#);
  /// ```
  pub fn escape(&self, value: &str) -> String {
    match self {
      Platform::Posix => escape_posix(value),
      Platform::Windows => escape_windows(value),
    }
  }
}

/// Quotes for cmd.exe and the MS C runtime argument parser.
///
/// `"` is doubled since both parsers understand that. `%` is wrapped as
/// `"%"` so it cannot expand an environment variable. Backslashes are
/// doubled so the CRT parser keeps them. Newlines cannot live inside
/// quotes in cmd.exe, so each run of them is moved outside behind a `^`.
pub fn escape_windows(value: &str) -> String {
  let quoted = value
    .replace('"', "\"\"")
    .replace('%', "\"%\"")
    .replace('\\', "\\\\");
  let mut out = String::with_capacity(quoted.len() + 2);
  out.push('"');
  let mut in_break = false;
  for c in quoted.chars() {
    let is_break = c == '\r' || c == '\n';
    if is_break && !in_break {
      out.push_str("\"^");
    } else if !is_break && in_break {
      out.push('"');
    }
    in_break = is_break;
    out.push(c);
  }
  if in_break {
    out.push('"');
  }
  out.push('"');
  out
}

/// Quotes for POSIX shells.
///
/// Plain printable ASCII without `'` goes into single quotes untouched,
/// anything else uses ANSI-C quoting (`$'...'`).
pub fn escape_posix(value: &str) -> String {
  if !value.chars().any(needs_ansi_c) {
    return format!("'{value}'");
  }
  let mut out = String::with_capacity(value.len() + 3);
  out.push_str("$'");
  for c in value.chars() {
    match c {
      '\\' => out.push_str("\\\\"),
      '\'' => out.push_str("\\'"),
      '\n' => out.push_str("\\n"),
      '\r' => out.push_str("\\r"),
      ' '..='~' => out.push(c),
      _ => push_code_point(&mut out, c),
    }
  }
  out.push('\'');
  out
}

fn needs_ansi_c(c: char) -> bool {
  c == '\'' || !matches!(c, ' '..='~')
}

fn push_code_point(out: &mut String, c: char) {
  let code = u32::from(c);
  let escaped = match code {
    0..=0xff => format!("\\x{code:02x}"),
    0x100..=0xffff => format!("\\u{code:04x}"),
    _ => format!("\\U{code:08x}"),
  };
  out.push_str(&escaped);
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn posix_plain() {
    assert_eq!(escape_posix("abc"), "'abc'");
    assert_eq!(escape_posix(""), "''");
    assert_eq!(escape_posix("a \"b\" $HOME `x` \\"), "'a \"b\" $HOME `x` \\'");
  }

  #[test]
  fn posix_ansi_c() {
    assert_eq!(escape_posix("it's"), "$'it\\'s'");
    assert_eq!(escape_posix("a\nb\r"), "$'a\\nb\\r'");
    assert_eq!(escape_posix("\\'"), "$'\\\\\\''");
    assert_eq!(escape_posix("\t\u{7f}"), "$'\\x09\\x7f'");
    assert_eq!(escape_posix("\u{1}"), "$'\\x01'");
    assert_eq!(escape_posix("é"), "$'\\xe9'");
    assert_eq!(escape_posix("Ж"), "$'\\u0416'");
    assert_eq!(escape_posix("\u{20ac}"), "$'\\u20ac'");
    assert_eq!(escape_posix("\u{1f600}"), "$'\\U0001f600'");
  }

  #[test]
  fn windows() {
    assert_eq!(escape_windows("abc"), "\"abc\"");
    assert_eq!(escape_windows("a\"b"), "\"a\"\"b\"");
    assert_eq!(escape_windows("%PATH%"), "\"\"%\"PATH\"%\"\"");
    assert_eq!(escape_windows("a\\b"), "\"a\\\\b\"");
    assert_eq!(escape_windows("a\r\nb"), "\"a\"^\r\n\"b\"");
    assert_eq!(escape_windows("a\n\nb\nc"), "\"a\"^\n\n\"b\"^\n\"c\"");
    assert_eq!(escape_windows("\n"), "\"\"^\n\"\"");
  }

  #[test]
  fn platform_dispatch() {
    assert_eq!(Platform::Posix.escape("x'"), escape_posix("x'"));
    assert_eq!(Platform::Windows.escape("x'"), escape_windows("x'"));
    assert_eq!(Platform::default(), Platform::current());
  }
}
