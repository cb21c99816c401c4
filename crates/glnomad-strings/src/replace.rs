//! In-place find-and-replace inside a fixed buffer.

use crate::bounded::{cstr_bytes, cstr_len};

fn find_from(hay: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    hay.get(from..)?
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|i| i + from)
}

/// Replace every occurrence of `find` with `with` in the string held in
/// `buf`, returning how many replacements were made.
///
/// The string may grow up to `max_len` bytes including its terminator
/// (`max_len` is clamped to `buf.len()`). A replacement that would not fit is
/// not made, and neither is anything after it; the string stays terminated
/// and the count of replacements already done is returned. Replaced text is
/// never rescanned, so `with` may contain `find`.
pub fn replace(find: &[u8], with: &[u8], buf: &mut [u8], max_len: usize) -> usize {
    let find = cstr_bytes(find);
    let with = cstr_bytes(with);
    if find.is_empty() {
        return 0;
    }

    let max_len = max_len.min(buf.len());
    let grows = with.len() > find.len();
    let mut len = cstr_len(buf);
    let mut pos = 0;
    let mut count = 0;

    while let Some(at) = find_from(&buf[..len], find, pos) {
        let new_len = len - find.len() + with.len();
        if grows && new_len >= max_len {
            log::debug!("replace: stopping after {count} replacements, buffer full");
            break;
        }

        buf.copy_within(at + find.len()..len, at + with.len());
        buf[at..at + with.len()].copy_from_slice(with);
        len = new_len;
        if len < buf.len() {
            buf[len] = 0;
        }

        pos = at + with.len();
        count += 1;
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounded::{strncpyz, to_str_lossy};

    const SENTINEL: u8 = 0xAA;

    fn buffer_with(text: &str, size: usize) -> Vec<u8> {
        let mut buf = vec![SENTINEL; size];
        strncpyz(&mut buf, text.as_bytes(), size).unwrap();
        buf
    }

    #[test]
    fn grow_replaces_all_when_capacity_exactly_fits() {
        // "a longerword b longerword c" is 27 bytes plus the terminator.
        let mut storage = buffer_with("a foo b foo c", 32);
        let n = replace(b"foo", b"longerword", &mut storage, 28);
        assert_eq!(n, 2);
        assert_eq!(to_str_lossy(&storage), "a longerword b longerword c");
        assert_eq!(storage[27], 0);
        assert!(storage[28..].iter().all(|&b| b == SENTINEL));
    }

    #[test]
    fn grow_stops_when_next_replacement_does_not_fit() {
        let mut storage = buffer_with("a foo b foo c", 32);
        let n = replace(b"foo", b"longerword", &mut storage, 27);
        assert_eq!(n, 1);
        assert_eq!(to_str_lossy(&storage), "a longerword b foo c");
        assert!(storage[27..].iter().all(|&b| b == SENTINEL));
    }

    #[test]
    fn grow_refuses_first_replacement() {
        let mut storage = buffer_with("foo", 8);
        assert_eq!(replace(b"foo", b"longerword", &mut storage, 8), 0);
        assert_eq!(to_str_lossy(&storage), "foo");
    }

    #[test]
    fn shrink_replaces_all() {
        let mut storage = buffer_with("one::two::three", 32);
        let n = replace(b"::", b"/", &mut storage, 32);
        assert_eq!(n, 2);
        assert_eq!(to_str_lossy(&storage), "one/two/three");
    }

    #[test]
    fn shrink_to_nothing() {
        let mut storage = buffer_with("xaxbx", 16);
        assert_eq!(replace(b"x", b"", &mut storage, 16), 3);
        assert_eq!(to_str_lossy(&storage), "ab");
    }

    #[test]
    fn equal_length_replaces_all() {
        let mut storage = buffer_with("GL_REPEAT GL_REPEAT", 32);
        assert_eq!(replace(b"REPEAT", b"LINEAR", &mut storage, 32), 2);
        assert_eq!(to_str_lossy(&storage), "GL_LINEAR GL_LINEAR");
    }

    #[test]
    fn no_match_returns_zero() {
        let mut storage = buffer_with("tileset", 16);
        assert_eq!(replace(b"map", b"x", &mut storage, 16), 0);
        assert_eq!(to_str_lossy(&storage), "tileset");
    }

    #[test]
    fn empty_find_returns_zero() {
        let mut storage = buffer_with("abc", 8);
        assert_eq!(replace(b"", b"x", &mut storage, 8), 0);
    }

    #[test]
    fn replacement_containing_find_is_not_rescanned() {
        let mut storage = buffer_with("a a", 16);
        assert_eq!(replace(b"a", b"aa", &mut storage, 16), 2);
        assert_eq!(to_str_lossy(&storage), "aa aa");
    }

    #[test]
    fn max_len_clamped_to_buffer() {
        let mut storage = buffer_with("ab", 4);
        assert_eq!(replace(b"b", b"bb", &mut storage, 100), 1);
        assert_eq!(to_str_lossy(&storage), "abb");
        assert_eq!(replace(b"b", b"bb", &mut storage, 100), 0);
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn never_writes_past_max_len(
                text in "[ab ]{0,20}",
                with in "[abc]{0,6}",
                max_len in 1usize..40,
            ) {
                let mut storage = vec![SENTINEL; 48];
                let init = text.len().min(max_len - 1);
                storage[..init].copy_from_slice(&text.as_bytes()[..init]);
                storage[init] = 0;

                replace(b"a", with.as_bytes(), &mut storage, max_len);

                prop_assert!(storage[..max_len].contains(&0));
                prop_assert!(storage[max_len..].iter().all(|&b| b == SENTINEL));
            }

            #[test]
            fn matches_str_replace_when_room(text in "[xy ]{0,20}", with in "[z]{0,4}") {
                let mut storage = buffer_with(&text, 128);
                let n = replace(b"x", with.as_bytes(), &mut storage, 128);
                prop_assert_eq!(n, text.matches('x').count());
                prop_assert_eq!(to_str_lossy(&storage), text.replace('x', &with));
            }
        }
    }
}
