//! Usage errors for the bounded primitives.

use glnomad_types::GlnError;

/// A call that violates a primitive's contract.
///
/// These indicate a bug in the caller, not bad input data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StrError {
    #[error("strncpyz: bad count")]
    BadCount,

    #[error("strncpyz: count {count} exceeds destination of {len} bytes")]
    CountExceedsBuffer { count: usize, len: usize },
}

impl From<StrError> for GlnError {
    fn from(e: StrError) -> Self {
        GlnError::Usage(e.to_string())
    }
}
