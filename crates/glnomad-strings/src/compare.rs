//! ASCII case-insensitive comparison and search.
//!
//! Letters are folded to lowercase before comparing; everything else is
//! compared by byte value. Nothing here is locale-aware.

use std::cmp::Ordering;

use crate::bounded::cstr_bytes;

/// Compare at most `n` bytes of two strings, ignoring ASCII case.
pub fn stricmpn(s1: impl AsRef<[u8]>, s2: impl AsRef<[u8]>, n: usize) -> Ordering {
    let a = cstr_bytes(s1.as_ref());
    let b = cstr_bytes(s2.as_ref());

    for i in 0..n {
        let c1 = a.get(i).copied().unwrap_or(0);
        let c2 = b.get(i).copied().unwrap_or(0);
        let (f1, f2) = (c1.to_ascii_lowercase(), c2.to_ascii_lowercase());
        if f1 != f2 {
            return f1.cmp(&f2);
        }
        if c1 == 0 {
            break;
        }
    }
    Ordering::Equal
}

/// Compare two strings, ignoring ASCII case.
pub fn stricmp(s1: impl AsRef<[u8]>, s2: impl AsRef<[u8]>) -> Ordering {
    stricmpn(s1, s2, usize::MAX)
}

/// [`stricmp`] for possibly-absent strings. Two absent strings are equal and
/// an absent string sorts before any present one.
pub fn stricmp_nullable(s1: Option<&[u8]>, s2: Option<&[u8]>) -> Ordering {
    stricmpn_nullable(s1, s2, usize::MAX)
}

/// [`stricmpn`] for possibly-absent strings.
pub fn stricmpn_nullable(s1: Option<&[u8]>, s2: Option<&[u8]>, n: usize) -> Ordering {
    match (s1, s2) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => stricmpn(a, b, n),
    }
}

/// Offset of the first case-insensitive occurrence of `needle` in
/// `haystack`. An empty needle matches at offset 0.
pub fn stristr(haystack: impl AsRef<[u8]>, needle: impl AsRef<[u8]>) -> Option<usize> {
    let hay = cstr_bytes(haystack.as_ref());
    let needle = cstr_bytes(needle.as_ref());
    if needle.is_empty() {
        return Some(0);
    }
    hay.windows(needle.len())
        .position(|w| w.eq_ignore_ascii_case(needle))
}
