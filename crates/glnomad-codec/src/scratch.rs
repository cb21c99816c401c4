//! Growable scratch buffers for one-shot codec calls.

use glnomad_types::config::DEFAULT_MAX_DECOMPRESSED;

/// Smallest scratch allocation.
const MIN_SCRATCH: usize = 64;

/// Sizing for the output of one codec call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Largest output buffer a call may allocate.
    pub max_output: usize,
    /// Output size known ahead of time. When absent the first scratch buffer
    /// is sized from the input: 1x for compression, 2x for decompression.
    pub expected_len: Option<usize>,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_output: DEFAULT_MAX_DECOMPRESSED,
            expected_len: None,
        }
    }
}

impl Limits {
    pub fn with_max_output(max_output: usize) -> Self {
        Self {
            max_output,
            ..Self::default()
        }
    }

    /// Limits for a call whose output size is known exactly.
    pub fn exact(len: usize) -> Self {
        Self {
            max_output: len.saturating_add(1),
            expected_len: Some(len),
        }
    }

    pub(crate) fn initial(&self, fallback: usize) -> usize {
        self.expected_len
            .unwrap_or(fallback)
            .max(MIN_SCRATCH)
            .min(self.max_output)
    }

    /// Limits for compressing `len` bytes: the ceiling is raised to cover
    /// the worst-case expansion of either codec.
    pub(crate) fn for_compression(&self, len: usize) -> Self {
        let worst_case = len.saturating_add(len / 2).saturating_add(1024);
        Self {
            max_output: self.max_output.max(worst_case),
            expected_len: self.expected_len,
        }
    }
}

/// Why a scratch buffer could not grow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GrowError {
    /// Already at the ceiling.
    Full,
    /// The allocator refused.
    Alloc,
}

/// An output buffer that doubles on demand up to a ceiling.
pub(crate) struct Scratch {
    buf: Vec<u8>,
    max: usize,
}

impl Scratch {
    pub(crate) fn new(initial: usize, max: usize) -> Result<Self, GrowError> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(initial.min(max))
            .map_err(|_| GrowError::Alloc)?;
        Ok(Self { buf, max })
    }

    pub(crate) fn buf_mut(&mut self) -> &mut Vec<u8> {
        &mut self.buf
    }

    pub(crate) fn is_full(&self) -> bool {
        self.buf.len() == self.buf.capacity()
    }

    pub(crate) fn grow(&mut self) -> Result<(), GrowError> {
        let cap = self.buf.capacity();
        if cap >= self.max {
            return Err(GrowError::Full);
        }
        let target = cap.saturating_mul(2).max(MIN_SCRATCH).min(self.max);
        log::debug!("Growing scratch buffer from {cap} to {target} bytes");
        self.buf
            .try_reserve_exact(target - self.buf.len())
            .map_err(|_| GrowError::Alloc)
    }

    /// Hand back the output, reallocated to its exact length.
    pub(crate) fn finish(mut self) -> Vec<u8> {
        self.buf.shrink_to_fit();
        self.buf
    }
}
