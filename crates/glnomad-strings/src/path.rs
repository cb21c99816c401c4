//! File name and extension helpers.

use std::path::MAIN_SEPARATOR;

use crate::bounded::{cstr_bytes, strcat};

fn is_separator(c: char) -> bool {
    c == '/' || c == MAIN_SEPARATOR
}

/// Offset of the extension dot in the last path component, if any.
fn extension_dot(path: &str) -> Option<usize> {
    let dot = path.rfind('.')?;
    match path.rfind(is_separator) {
        Some(slash) if slash > dot => None,
        _ => Some(dot),
    }
}

/// The last component of `path`.
pub fn get_filename(path: &str) -> &str {
    match path.rfind(is_separator) {
        Some(i) => &path[i + 1..],
        None => path,
    }
}

/// The extension of the last component of `name`, without the dot, or `""`.
pub fn get_extension(name: &str) -> &str {
    match extension_dot(name) {
        Some(dot) => &name[dot + 1..],
        None => "",
    }
}

/// `name` without the extension of its last component.
pub fn strip_extension(name: &str) -> &str {
    match extension_dot(name) {
        Some(dot) => &name[..dot],
        None => name,
    }
}

/// Append `extension` (which should include the `.`) to the path held in
/// `buf` unless its last component already has one.
///
/// Returns `false` only when the buffer was already overflowing.
pub fn default_extension(buf: &mut [u8], extension: &str) -> bool {
    let has_extension = match std::str::from_utf8(cstr_bytes(buf)) {
        Ok(path) => extension_dot(path).is_some(),
        Err(_) => false,
    };
    if has_extension {
        return true;
    }
    strcat(buf, extension.as_bytes())
}
