//! Compression algorithm selector.
//!
//! The selector is integer-backed so it can come from a numeric process
//! parameter (`-compression 1`) as well as from a name in the config file.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::GlnError;

/// Which block codec a buffer is (or should be) compressed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "CompressionRepr")]
#[repr(u8)]
pub enum Compression {
    /// Identity: buffers pass through untouched.
    #[default]
    None = 0,
    /// DEFLATE in a zlib container.
    Zlib = 1,
    /// Burrows-Wheeler block sorting.
    Bzip2 = 2,
}

impl Compression {
    /// All selectors, in tag order.
    pub const ALL: [Compression; 3] = [Compression::None, Compression::Zlib, Compression::Bzip2];

    /// Lowercase name used in config files and log lines.
    pub fn name(self) -> &'static str {
        match self {
            Compression::None => "none",
            Compression::Zlib => "zlib",
            Compression::Bzip2 => "bzip2",
        }
    }

    /// Integer tag.
    pub fn tag(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<i64> for Compression {
    type Error = GlnError;

    fn try_from(tag: i64) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(Compression::None),
            1 => Ok(Compression::Zlib),
            2 => Ok(Compression::Bzip2),
            other => Err(GlnError::Config(format!(
                "unknown compression tag: {other}"
            ))),
        }
    }
}

impl FromStr for Compression {
    type Err = GlnError;

    /// Accepts a name (case-insensitive) or an integer tag.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(tag) = s.parse::<i64>() {
            return Compression::try_from(tag);
        }
        Compression::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| GlnError::Config(format!("unknown compression: {s}")))
    }
}

/// Accepted config-file spellings of a [`Compression`].
#[derive(Deserialize)]
#[serde(untagged)]
enum CompressionRepr {
    Tag(i64),
    Name(String),
}

impl TryFrom<CompressionRepr> for Compression {
    type Error = GlnError;

    fn try_from(repr: CompressionRepr) -> Result<Self, Self::Error> {
        match repr {
            CompressionRepr::Tag(tag) => Compression::try_from(tag),
            CompressionRepr::Name(name) => name.parse(),
        }
    }
}
