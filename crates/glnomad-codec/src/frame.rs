//! Self-describing compressed blobs.
//!
//! A frame is a 9-byte header followed by the payload:
//!
//! ```text
//! offset  size  field
//! 0       8     original (uncompressed) length, little-endian u64
//! 8       1     algorithm tag (0 none, 1 zlib, 2 bzip2)
//! 9       ..    payload
//! ```
//!
//! Storing the exact length lets the decoder size its output buffer once
//! and reject blobs that claim more than the configured ceiling before
//! touching the payload.

use glnomad_types::{Compression, GlnError};

use crate::error::CodecError;
use crate::scratch::Limits;

/// Size of the frame header in bytes.
pub const HEADER_LEN: usize = 9;

/// Decoded frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub original_len: u64,
    pub algorithm: Compression,
}

#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("frame truncated: {len} bytes is shorter than the 9-byte header")]
    Truncated { len: usize },

    #[error("frame has unknown algorithm tag {0}")]
    UnknownAlgorithm(u8),

    #[error("frame claims {len} bytes, more than the {max}-byte limit")]
    TooLarge { len: u64, max: usize },

    #[error("frame payload decoded to {actual} bytes, header says {expected}")]
    LengthMismatch { expected: u64, actual: usize },

    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl From<FrameError> for GlnError {
    fn from(e: FrameError) -> Self {
        match e {
            FrameError::Codec(inner) => inner.into(),
            other => GlnError::Codec(other.to_string()),
        }
    }
}

/// Read the header of `bytes` without decoding the payload.
pub fn peek_header(bytes: &[u8]) -> Result<FrameHeader, FrameError> {
    let Some((len_bytes, rest)) = bytes.split_first_chunk::<8>() else {
        return Err(FrameError::Truncated { len: bytes.len() });
    };
    let Some(&tag) = rest.first() else {
        return Err(FrameError::Truncated { len: bytes.len() });
    };
    let algorithm =
        Compression::try_from(i64::from(tag)).map_err(|_| FrameError::UnknownAlgorithm(tag))?;
    Ok(FrameHeader {
        original_len: u64::from_le_bytes(*len_bytes),
        algorithm,
    })
}

/// Compress `data` with `algorithm` and prepend a frame header.
pub fn pack(data: &[u8], algorithm: Compression) -> Result<Vec<u8>, FrameError> {
    let payload = crate::compress(data, algorithm)?;
    let mut out = Vec::with_capacity(HEADER_LEN + payload.len());
    out.extend_from_slice(&(data.len() as u64).to_le_bytes());
    out.push(algorithm.tag());
    out.extend_from_slice(&payload);
    log::debug!(
        "Packed {} bytes into a {}-byte {} frame",
        data.len(),
        out.len(),
        algorithm
    );
    Ok(out)
}

/// Decode a frame produced by [`pack`] with default limits.
pub fn unpack(bytes: &[u8]) -> Result<Vec<u8>, FrameError> {
    unpack_with(bytes, &Limits::default())
}

/// Decode a frame, refusing any whose header claims more than
/// `limits.max_output` bytes.
pub fn unpack_with(bytes: &[u8], limits: &Limits) -> Result<Vec<u8>, FrameError> {
    let header = peek_header(bytes)?;
    let payload = &bytes[HEADER_LEN..];

    let expected = usize::try_from(header.original_len)
        .ok()
        .filter(|len| *len <= limits.max_output)
        .ok_or(FrameError::TooLarge {
            len: header.original_len,
            max: limits.max_output,
        })?;

    let out = crate::decompress_with(payload, header.algorithm, &Limits::exact(expected))?;
    if out.len() != expected {
        return Err(FrameError::LengthMismatch {
            expected: header.original_len,
            actual: out.len(),
        });
    }
    Ok(out.into_owned())
}
