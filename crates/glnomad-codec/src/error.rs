//! Codec failure kinds.
//!
//! Each codec has a closed set of failure kinds, and each kind has exactly
//! one human-readable reason.

use std::fmt;

use glnomad_types::{Compression, GlnError};

/// Which direction a failed call was going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Compression,
    Decompression,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Compression => f.write_str("compression"),
            Action::Decompression => f.write_str("decompression"),
        }
    }
}

/// zlib failure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZlibErrorKind {
    /// Input is not a valid (or complete) zlib stream.
    Data,
    /// Output would exceed the allowed buffer size.
    Buffer,
    /// The stream rejected its parameters or state.
    Stream,
    /// Scratch allocation failed.
    Memory,
}

impl ZlibErrorKind {
    pub fn describe(self) -> &'static str {
        match self {
            ZlibErrorKind::Data => "(Z_DATA_ERROR) buffer provided to zlib was corrupted",
            ZlibErrorKind::Buffer => "(Z_BUF_ERROR) buffer overflow",
            ZlibErrorKind::Stream => {
                "(Z_STREAM_ERROR) bad params passed to zlib, please report this bug"
            },
            ZlibErrorKind::Memory => "(Z_MEM_ERROR) memory allocation request made by zlib failed",
        }
    }
}

/// bzip2 failure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bzip2ErrorKind {
    Data,
    Memory,
    DataMagic,
    UnexpectedEof,
    OutbuffFull,
    Sequence,
    Param,
}

impl Bzip2ErrorKind {
    pub fn describe(self) -> &'static str {
        match self {
            Bzip2ErrorKind::Data => "(BZ_DATA_ERROR) buffer provided to bzip2 was corrupted",
            Bzip2ErrorKind::Memory => {
                "(BZ_MEM_ERROR) memory allocation request made by bzip2 failed"
            },
            Bzip2ErrorKind::DataMagic => {
                "(BZ_DATA_ERROR_MAGIC) buffer was not compressed with bzip2, it did not contain \"BZh\""
            },
            Bzip2ErrorKind::UnexpectedEof => "(BZ_UNEXPECTED_EOF) unexpected end of data stream",
            Bzip2ErrorKind::OutbuffFull => "(BZ_OUTBUFF_FULL) buffer overflow",
            Bzip2ErrorKind::Sequence => {
                "(BZ_SEQUENCE_ERROR) bad function call error, please report this bug"
            },
            Bzip2ErrorKind::Param => {
                "(BZ_PARAM_ERROR) bad params passed to bzip2, please report this bug"
            },
        }
    }
}

impl From<bzip2::Error> for Bzip2ErrorKind {
    fn from(e: bzip2::Error) -> Self {
        match e {
            bzip2::Error::Sequence => Bzip2ErrorKind::Sequence,
            bzip2::Error::Data => Bzip2ErrorKind::Data,
            bzip2::Error::DataMagic => Bzip2ErrorKind::DataMagic,
            bzip2::Error::Param => Bzip2ErrorKind::Param,
        }
    }
}

/// A failure kind tagged with the codec that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecErrorKind {
    Zlib(ZlibErrorKind),
    Bzip2(Bzip2ErrorKind),
}

impl CodecErrorKind {
    pub fn algorithm(self) -> Compression {
        match self {
            CodecErrorKind::Zlib(_) => Compression::Zlib,
            CodecErrorKind::Bzip2(_) => Compression::Bzip2,
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            CodecErrorKind::Zlib(kind) => kind.describe(),
            CodecErrorKind::Bzip2(kind) => kind.describe(),
        }
    }

    /// Whether the failure means the output did not fit the allowed size.
    pub fn is_overflow(self) -> bool {
        matches!(
            self,
            CodecErrorKind::Zlib(ZlibErrorKind::Buffer)
                | CodecErrorKind::Bzip2(Bzip2ErrorKind::OutbuffFull)
        )
    }

    fn label(self) -> &'static str {
        match self {
            CodecErrorKind::Zlib(_) => "ZLIB",
            CodecErrorKind::Bzip2(_) => "BZIP2",
        }
    }
}

/// A failed compress or decompress call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "Failure on {action} of {len} bytes. {} error reason: {}",
    .kind.label(),
    .kind.describe()
)]
pub struct CodecError {
    pub action: Action,
    /// Size of the input buffer.
    pub len: usize,
    pub kind: CodecErrorKind,
}

impl CodecError {
    pub fn new(action: Action, len: usize, kind: CodecErrorKind) -> Self {
        Self { action, len, kind }
    }

    pub fn algorithm(&self) -> Compression {
        self.kind.algorithm()
    }
}

impl From<CodecError> for GlnError {
    fn from(e: CodecError) -> Self {
        GlnError::Codec(e.to_string())
    }
}
