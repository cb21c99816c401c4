//! Owned fixed-capacity text buffer.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::bounded::{cstr_bytes, cstr_len, strcat, strncpyz};
use crate::replace::replace;

/// Longest prefix of `s` that is at most `max` bytes and ends on a char
/// boundary.
fn prefix_within(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// A NUL-terminated string stored inline in `N` bytes.
///
/// Holds at most `N - 1` bytes of text. Writes that do not fit are truncated
/// on a char boundary, so the contents are always valid UTF-8 and always
/// terminated.
#[derive(Clone, Copy)]
pub struct FixedStr<const N: usize> {
    buf: [u8; N],
}

impl<const N: usize> FixedStr<N> {
    /// An empty string.
    pub fn new() -> Self {
        const { assert!(N > 0, "FixedStr needs room for a terminator") };
        Self { buf: [0; N] }
    }

    /// Longest text this buffer can hold.
    pub const fn capacity(&self) -> usize {
        N - 1
    }

    /// Length of the current text in bytes.
    pub fn len(&self) -> usize {
        cstr_len(&self.buf)
    }

    /// Whether the text is empty.
    pub fn is_empty(&self) -> bool {
        self.buf[0] == 0
    }

    /// Replace the contents with `s`. Returns `false` if `s` was truncated.
    pub fn set(&mut self, s: &str) -> bool {
        let part = prefix_within(s, N - 1);
        let copied = strncpyz(&mut self.buf, part.as_bytes(), N);
        debug_assert!(copied.is_ok());
        part.len() == s.len()
    }

    /// Append `s`. Returns `false` if `s` was truncated.
    pub fn push_str(&mut self, s: &str) -> bool {
        let room = N - 1 - self.len();
        let part = prefix_within(s, room);
        strcat(&mut self.buf, part.as_bytes()) && part.len() == s.len()
    }

    /// Replace every occurrence of `from` with `to`, stopping before any
    /// replacement that would overflow. Returns the number made.
    pub fn replace(&mut self, from: &str, to: &str) -> usize {
        replace(from.as_bytes(), to.as_bytes(), &mut self.buf, N)
    }

    /// Empty the buffer.
    pub fn clear(&mut self) {
        self.buf[0] = 0;
    }

    /// The current text.
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(cstr_bytes(&self.buf)).unwrap_or_default()
    }

    /// The raw buffer, terminator and trailing bytes included.
    pub fn as_bytes_with_nul(&self) -> &[u8; N] {
        &self.buf
    }
}

impl<const N: usize> Default for FixedStr<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> From<&str> for FixedStr<N> {
    fn from(s: &str) -> Self {
        let mut out = Self::new();
        out.set(s);
        out
    }
}

impl<const N: usize> fmt::Display for FixedStr<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<const N: usize> fmt::Debug for FixedStr<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FixedStr<{N}>({:?})", self.as_str())
    }
}

impl<const N: usize> PartialEq for FixedStr<N> {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl<const N: usize> Eq for FixedStr<N> {}

impl<const N: usize> Hash for FixedStr<N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl<const N: usize> PartialEq<str> for FixedStr<N> {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl<const N: usize> PartialEq<&str> for FixedStr<N> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}
