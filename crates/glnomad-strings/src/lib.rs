//! Bounded string primitives.
//!
//! Every function here works on NUL-terminated byte strings stored in a
//! caller-owned buffer. The slice length is the buffer's capacity: a string
//! ends at its first NUL byte or at the end of the slice, and no function
//! ever writes past the slice it was given.
//!
//! Overflow is handled by a fixed policy rather than by failing:
//!
//! - [`strncpyz`] truncates and always terminates.
//! - [`strcat`] truncates and always terminates, but refuses to touch a
//!   buffer that is already missing its terminator.
//! - [`replace`] stops replacing once the next replacement would not fit.
//!
//! Only programmer errors (an impossible copy bound) are reported as
//! [`StrError`].

mod bounded;
mod compare;
mod error;
mod fixed;
pub mod path;
mod replace;

pub use bounded::{cstr_bytes, cstr_len, strcat, strncpyz, strupr, to_str_lossy};
pub use compare::{stricmp, stricmp_nullable, stricmpn, stricmpn_nullable, stristr};
pub use error::StrError;
pub use fixed::FixedStr;
pub use replace::replace;

/// Whether the whole of `s` parses as a number.
pub fn is_number(s: &str) -> bool {
    !s.is_empty() && s.parse::<f64>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_number_accepts_numbers() {
        assert!(is_number("42"));
        assert!(is_number("-1.5"));
        assert!(is_number("1e3"));
    }

    #[test]
    fn is_number_rejects_text() {
        assert!(!is_number(""));
        assert!(!is_number("12abc"));
        assert!(!is_number("1.5f"));
    }
}
