//! zlib codec backed by `flate2`.

use flate2::{FlushCompress, FlushDecompress, Status};
use glnomad_types::Compression;

use crate::error::{Action, CodecError, CodecErrorKind, ZlibErrorKind};
use crate::scratch::{GrowError, Limits, Scratch};
use crate::Codec;

/// DEFLATE in a zlib container (RFC 1950).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZlibCodec {
    level: u32,
}

impl ZlibCodec {
    /// Best compression, matching what map files are written with.
    pub const BEST: ZlibCodec = ZlibCodec { level: 9 };

    /// A codec at `level` (clamped to 0..=9).
    pub fn with_level(level: u32) -> Self {
        Self {
            level: level.min(9),
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }
}

impl Default for ZlibCodec {
    fn default() -> Self {
        Self::BEST
    }
}

fn fail(action: Action, len: usize, kind: ZlibErrorKind) -> CodecError {
    CodecError::new(action, len, CodecErrorKind::Zlib(kind))
}

fn grow_kind(e: GrowError) -> ZlibErrorKind {
    match e {
        GrowError::Full => ZlibErrorKind::Buffer,
        GrowError::Alloc => ZlibErrorKind::Memory,
    }
}

impl Codec for ZlibCodec {
    fn algorithm(&self) -> Compression {
        Compression::Zlib
    }

    fn compress(&self, data: &[u8], limits: &Limits) -> Result<Vec<u8>, CodecError> {
        let action = Action::Compression;
        log::info!("Compressing {} bytes with zlib", data.len());

        let limits = limits.for_compression(data.len());
        let mut scratch = Scratch::new(limits.initial(data.len()), limits.max_output)
            .map_err(|e| fail(action, data.len(), grow_kind(e)))?;
        let mut stream = flate2::Compress::new(flate2::Compression::new(self.level), true);

        loop {
            let consumed = stream.total_in() as usize;
            let status = stream
                .compress_vec(&data[consumed..], scratch.buf_mut(), FlushCompress::Finish)
                .map_err(|_| fail(action, data.len(), ZlibErrorKind::Stream))?;
            if status == Status::StreamEnd {
                break;
            }
            scratch
                .grow()
                .map_err(|e| fail(action, data.len(), grow_kind(e)))?;
        }

        let out = scratch.finish();
        log::info!(
            "Successful compression of {} to {} bytes with zlib",
            data.len(),
            out.len()
        );
        Ok(out)
    }

    fn decompress(&self, data: &[u8], limits: &Limits) -> Result<Vec<u8>, CodecError> {
        let action = Action::Decompression;
        log::info!("Decompressing {} bytes with zlib", data.len());

        let initial = limits.initial(data.len().saturating_mul(2));
        let mut scratch = Scratch::new(initial, limits.max_output)
            .map_err(|e| fail(action, data.len(), grow_kind(e)))?;
        let mut stream = flate2::Decompress::new(true);

        loop {
            let (in_before, out_before) = (stream.total_in(), stream.total_out());
            let status = stream
                .decompress_vec(
                    &data[in_before as usize..],
                    scratch.buf_mut(),
                    FlushDecompress::None,
                )
                .map_err(|_| fail(action, data.len(), ZlibErrorKind::Data))?;
            if status == Status::StreamEnd {
                break;
            }
            if scratch.is_full() {
                scratch
                    .grow()
                    .map_err(|e| fail(action, data.len(), grow_kind(e)))?;
                continue;
            }
            let progressed = stream.total_in() != in_before || stream.total_out() != out_before;
            if !progressed || stream.total_in() as usize == data.len() {
                // Input ran out before the end of the stream.
                return Err(fail(action, data.len(), ZlibErrorKind::Data));
            }
        }

        let out = scratch.finish();
        log::info!(
            "Successful decompression of {} bytes to {} bytes with zlib",
            data.len(),
            out.len()
        );
        Ok(out)
    }
}
