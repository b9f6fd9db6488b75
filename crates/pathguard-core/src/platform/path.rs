//! String-level path helpers.
//!
//! Allowlist matching works on the raw text the agent sent, so nothing here
//! touches the filesystem or normalizes `.`/`..` components. Separators are
//! the platform's: `/` on Unix, `/` and `\` on Windows.

use std::borrow::Cow;
use std::path::is_separator;

/// True if the last character of `s` is a path separator.
pub fn ends_with_separator(s: &str) -> bool {
    s.chars().next_back().is_some_and(is_separator)
}

/// Strip exactly one trailing separator.
/// Returns `None` when `s` does not end with a separator.
///
/// `/a/b/` → `/a/b`
/// `/a/b//` → `/a/b/`
pub fn strip_trailing_separator(s: &str) -> Option<&str> {
    let last = s.chars().next_back()?;
    if is_separator(last) {
        Some(&s[..s.len() - last.len_utf8()])
    } else {
        None
    }
}

/// Escape control characters so a path prints on a single line.
///
/// `/x\ny` → `/x\\ny`
/// Backslashes and quotes are left alone, so Windows paths read as typed.
pub fn escape_control(s: &str) -> Cow<'_, str> {
    if !s.chars().any(char::is_control) {
        return Cow::Borrowed(s);
    }
    let mut escaped = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        if c.is_control() {
            escaped.extend(c.escape_default());
        } else {
            escaped.push(c);
        }
    }
    Cow::Owned(escaped)
}
