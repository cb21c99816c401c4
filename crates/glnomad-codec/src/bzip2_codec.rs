//! bzip2 codec backed by the `bzip2` crate.

use bzip2::{Action as BzAction, Status};
use glnomad_types::Compression;

use crate::error::{Action, Bzip2ErrorKind, CodecError, CodecErrorKind};
use crate::scratch::{GrowError, Limits, Scratch};
use crate::Codec;

const DEFAULT_WORK_FACTOR: u32 = 50;

/// bzip2 with 900k blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bzip2Codec {
    block_size: u32,
    work_factor: u32,
}

impl Bzip2Codec {
    pub const BEST: Bzip2Codec = Bzip2Codec {
        block_size: 9,
        work_factor: DEFAULT_WORK_FACTOR,
    };

    /// Block size in units of 100k, clamped to 1..=9.
    pub fn with_block_size(block_size: u32) -> Self {
        Self {
            block_size: block_size.clamp(1, 9),
            ..Self::BEST
        }
    }

    pub fn block_size(&self) -> u32 {
        self.block_size
    }
}

impl Default for Bzip2Codec {
    fn default() -> Self {
        Self::BEST
    }
}

fn fail(action: Action, len: usize, kind: Bzip2ErrorKind) -> CodecError {
    CodecError::new(action, len, CodecErrorKind::Bzip2(kind))
}

fn grow_kind(e: GrowError) -> Bzip2ErrorKind {
    match e {
        GrowError::Full => Bzip2ErrorKind::OutbuffFull,
        GrowError::Alloc => Bzip2ErrorKind::Memory,
    }
}

impl Codec for Bzip2Codec {
    fn algorithm(&self) -> Compression {
        Compression::Bzip2
    }

    fn compress(&self, data: &[u8], limits: &Limits) -> Result<Vec<u8>, CodecError> {
        let action = Action::Compression;
        log::info!("Compressing {} bytes with bzip2", data.len());

        let limits = limits.for_compression(data.len());
        let mut scratch = Scratch::new(limits.initial(data.len()), limits.max_output)
            .map_err(|e| fail(action, data.len(), grow_kind(e)))?;
        let mut stream = bzip2::Compress::new(
            bzip2::Compression::new(self.block_size),
            self.work_factor,
        );

        loop {
            let consumed = stream.total_in() as usize;
            let status = stream
                .compress_vec(&data[consumed..], scratch.buf_mut(), BzAction::Finish)
                .map_err(|e| fail(action, data.len(), e.into()))?;
            if status == Status::StreamEnd {
                break;
            }
            scratch
                .grow()
                .map_err(|e| fail(action, data.len(), grow_kind(e)))?;
        }

        let out = scratch.finish();
        log::info!(
            "Successful compression of {} to {} bytes with bzip2",
            data.len(),
            out.len()
        );
        Ok(out)
    }

    fn decompress(&self, data: &[u8], limits: &Limits) -> Result<Vec<u8>, CodecError> {
        let action = Action::Decompression;
        log::info!("Decompressing {} bytes with bzip2", data.len());

        let initial = limits.initial(data.len().saturating_mul(2));
        let mut scratch = Scratch::new(initial, limits.max_output)
            .map_err(|e| fail(action, data.len(), grow_kind(e)))?;
        let mut stream = bzip2::Decompress::new(false);

        loop {
            let (in_before, out_before) = (stream.total_in(), stream.total_out());
            let status = stream
                .decompress_vec(&data[in_before as usize..], scratch.buf_mut())
                .map_err(|e| fail(action, data.len(), e.into()))?;
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
                return Err(fail(action, data.len(), Bzip2ErrorKind::UnexpectedEof));
            }
        }

        let out = scratch.finish();
        log::info!(
            "Successful decompression of {} bytes to {} bytes with bzip2",
            data.len(),
            out.len()
        );
        Ok(out)
    }
}
