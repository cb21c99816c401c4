//! Terminated copy and concatenation into fixed buffers.

use std::borrow::Cow;

use crate::error::StrError;

/// Length of the NUL-terminated string in `buf`.
///
/// A buffer without a terminator is as long as the slice.
pub fn cstr_len(buf: &[u8]) -> usize {
    buf.iter().position(|&b| b == 0).unwrap_or(buf.len())
}

/// The bytes of the string in `buf`, without the terminator.
pub fn cstr_bytes(buf: &[u8]) -> &[u8] {
    &buf[..cstr_len(buf)]
}

/// The string in `buf` as text, replacing invalid UTF-8.
pub fn to_str_lossy(buf: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(cstr_bytes(buf))
}

/// Copy at most `count - 1` bytes of `src` into `dest` and terminate.
///
/// The terminator always lands inside the first `count` bytes of `dest`.
/// Bytes after the terminator are left as they were.
pub fn strncpyz(dest: &mut [u8], src: &[u8], count: usize) -> Result<(), StrError> {
    if count < 1 {
        return Err(StrError::BadCount);
    }
    if count > dest.len() {
        return Err(StrError::CountExceedsBuffer {
            count,
            len: dest.len(),
        });
    }
    let src = cstr_bytes(src);
    let n = src.len().min(count - 1);
    dest[..n].copy_from_slice(&src[..n]);
    dest[n] = 0;
    Ok(())
}

/// Append `src` to the string in `dest`.
///
/// Returns `false` without writing anything when `dest` holds no terminator
/// (the string already fills the buffer). Otherwise appends as much of `src`
/// as fits, terminates, and returns `true`; a truncated append still counts
/// as success.
pub fn strcat(dest: &mut [u8], src: &[u8]) -> bool {
    let size = dest.len();
    let l1 = cstr_len(dest);
    if l1 >= size {
        log::warn!("strcat: already overflowed");
        return false;
    }

    let src = cstr_bytes(src);
    let n = src.len().min(size - l1 - 1);
    dest[l1..l1 + n].copy_from_slice(&src[..n]);
    dest[l1 + n] = 0;
    true
}

/// Upper-case the ASCII letters of the string in `buf`, in place.
pub fn strupr(buf: &mut [u8]) {
    let n = cstr_len(buf);
    buf[..n].make_ascii_uppercase();
}

#[cfg(test)]
mod tests {
    use super::*;

    const SENTINEL: u8 = 0xAA;

    #[test]
    fn cstr_len_stops_at_nul() {
        assert_eq!(cstr_len(b"abc\0def"), 3);
        assert_eq!(cstr_len(b"abc"), 3);
        assert_eq!(cstr_len(b""), 0);
    }

    #[test]
    fn to_str_lossy_reads_up_to_nul() {
        assert_eq!(to_str_lossy(b"map01\0junk"), "map01");
    }

    #[test]
    fn strncpyz_copies_and_terminates() {
        let mut buf = [SENTINEL; 16];
        strncpyz(&mut buf, b"hello", 16).unwrap();
        assert_eq!(&buf[..6], b"hello\0");
        assert_eq!(buf[6], SENTINEL, "no zero fill past the terminator");
    }

    #[test]
    fn strncpyz_truncates_to_count_minus_one() {
        let mut buf = [SENTINEL; 8];
        strncpyz(&mut buf, b"overlong source", 4).unwrap();
        assert_eq!(&buf[..4], b"ove\0");
        assert!(buf[4..].iter().all(|&b| b == SENTINEL));
    }

    #[test]
    fn strncpyz_count_one_writes_only_terminator() {
        let mut buf = [SENTINEL; 4];
        strncpyz(&mut buf, b"abc", 1).unwrap();
        assert_eq!(buf, [0, SENTINEL, SENTINEL, SENTINEL]);
    }

    #[test]
    fn strncpyz_source_stops_at_its_nul() {
        let mut buf = [SENTINEL; 8];
        strncpyz(&mut buf, b"ab\0cd", 8).unwrap();
        assert_eq!(&buf[..3], b"ab\0");
    }

    #[test]
    fn strncpyz_zero_count_is_usage_error() {
        let mut buf = [0u8; 4];
        assert_eq!(strncpyz(&mut buf, b"a", 0), Err(StrError::BadCount));
    }

    #[test]
    fn strncpyz_count_larger_than_dest_is_usage_error() {
        let mut buf = [0u8; 4];
        assert_eq!(
            strncpyz(&mut buf, b"a", 5),
            Err(StrError::CountExceedsBuffer { count: 5, len: 4 })
        );
    }

    #[test]
    fn strcat_appends() {
        let mut buf = [0u8; 16];
        strncpyz(&mut buf, b"maps/", 16).unwrap();
        assert!(strcat(&mut buf, b"level1"));
        assert_eq!(to_str_lossy(&buf), "maps/level1");
    }

    #[test]
    fn strcat_truncates_and_terminates() {
        let mut storage = [SENTINEL; 12];
        {
            let dest = &mut storage[..8];
            strncpyz(dest, b"abc", 8).unwrap();
            assert!(strcat(dest, b"defghijk"));
            assert_eq!(&dest[..8], b"abcdefg\0");
        }
        assert!(storage[8..].iter().all(|&b| b == SENTINEL));
    }

    #[test]
    fn strcat_exactly_full_string_appends_nothing() {
        let mut buf = *b"abc\0";
        assert!(strcat(&mut buf, b"xyz"));
        assert_eq!(&buf, b"abc\0");
    }

    #[test]
    fn strcat_refuses_unterminated_buffer() {
        let mut buf = *b"abcd";
        assert!(!strcat(&mut buf, b"e"));
        assert_eq!(&buf, b"abcd");
    }

    #[test]
    fn strcat_into_empty_buffer_slice() {
        let mut buf: [u8; 0] = [];
        assert!(!strcat(&mut buf, b"x"));
    }

    #[test]
    fn strupr_uppercases_ascii_only_up_to_nul() {
        let mut buf = *b"gl_linear\0tail";
        strupr(&mut buf);
        assert_eq!(&buf, b"GL_LINEAR\0tail");
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn strcat_never_writes_past_buffer(
                existing in proptest::collection::vec(1u8..=255, 0..40),
                append in proptest::collection::vec(1u8..=255, 0..40),
                size in 0usize..32,
            ) {
                let mut storage = [SENTINEL; 64];
                let n = existing.len().min(size);
                storage[..n].copy_from_slice(&existing[..n]);
                if n < size {
                    storage[n] = 0;
                }
                let before = storage;

                let ok = strcat(&mut storage[..size], &append);

                prop_assert!(storage[size..].iter().all(|&b| b == SENTINEL));
                if n >= size {
                    prop_assert!(!ok);
                    prop_assert_eq!(&storage[..], &before[..]);
                } else {
                    prop_assert!(ok);
                    prop_assert!(storage[..size].contains(&0));
                }
            }

            #[test]
            fn strncpyz_always_terminates_within_count(
                src in proptest::collection::vec(any::<u8>(), 0..64),
                count in 1usize..32,
            ) {
                let mut storage = [SENTINEL; 48];
                strncpyz(&mut storage[..32], &src, count).unwrap();
                prop_assert!(storage[..count].contains(&0));
                prop_assert!(storage[32..].iter().all(|&b| b == SENTINEL));
            }
        }
    }
}
