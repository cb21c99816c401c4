//! Compression codec dispatch for the GLNomad editor.
//!
//! Map and resource blobs are stored either raw, zlib-compressed, or
//! bzip2-compressed. [`compress`] and [`decompress`] pick the codec from a
//! [`Compression`] tag; `Compression::None` hands the input back without
//! copying. The [`frame`] module wraps a payload with its original length
//! and algorithm so it can be decoded without outside bookkeeping.

use std::borrow::Cow;

use glnomad_types::Compression;

pub mod bzip2_codec;
pub mod error;
pub mod frame;
mod scratch;
pub mod zlib_codec;

pub use bzip2_codec::Bzip2Codec;
pub use error::{Action, Bzip2ErrorKind, CodecError, CodecErrorKind, ZlibErrorKind};
pub use frame::{FrameError, FrameHeader, pack, peek_header, unpack, unpack_with};
pub use scratch::Limits;
pub use zlib_codec::ZlibCodec;

/// A whole-buffer compressor.
pub trait Codec: Send + Sync {
    /// The tag this codec handles.
    fn algorithm(&self) -> Compression;

    /// Compress all of `data` in one call.
    fn compress(&self, data: &[u8], limits: &Limits) -> Result<Vec<u8>, CodecError>;

    /// Decompress all of `data`, failing if the output would exceed
    /// `limits.max_output`.
    fn decompress(&self, data: &[u8], limits: &Limits) -> Result<Vec<u8>, CodecError>;
}

static ZLIB: ZlibCodec = ZlibCodec::BEST;
static BZIP2: Bzip2Codec = Bzip2Codec::BEST;

/// The codec for `algorithm`, or `None` for uncompressed data.
pub fn codec_for(algorithm: Compression) -> Option<&'static dyn Codec> {
    match algorithm {
        Compression::None => None,
        Compression::Zlib => Some(&ZLIB),
        Compression::Bzip2 => Some(&BZIP2),
    }
}

/// Compress `data` with `algorithm` using default limits.
pub fn compress(data: &[u8], algorithm: Compression) -> Result<Cow<'_, [u8]>, CodecError> {
    compress_with(data, algorithm, &Limits::default())
}

pub fn compress_with<'a>(
    data: &'a [u8],
    algorithm: Compression,
    limits: &Limits,
) -> Result<Cow<'a, [u8]>, CodecError> {
    match codec_for(algorithm) {
        Some(codec) => codec.compress(data, limits).map(Cow::Owned),
        None => Ok(Cow::Borrowed(data)),
    }
}

/// Decompress `data` with `algorithm` using default limits.
pub fn decompress(data: &[u8], algorithm: Compression) -> Result<Cow<'_, [u8]>, CodecError> {
    decompress_with(data, algorithm, &Limits::default())
}

pub fn decompress_with<'a>(
    data: &'a [u8],
    algorithm: Compression,
    limits: &Limits,
) -> Result<Cow<'a, [u8]>, CodecError> {
    match codec_for(algorithm) {
        Some(codec) => codec.decompress(data, limits).map(Cow::Owned),
        None => Ok(Cow::Borrowed(data)),
    }
}
