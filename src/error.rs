//! Top-level error type for the huffpack library
//!

use crate::min_heap::HeapErr;

/// Result alias used throughout the crate.
pub type Result<T, E = HuffmanError> = std::result::Result<T, E>;

/// Errors
#[derive(Debug, thiserror::Error)]
pub enum HuffmanError {
    /// Compression was asked to encode a zero-length buffer.
    #[error("cannot compress an empty buffer")]
    EmptyInput,
    /// The container is too short to hold even the one-byte header.
    #[error("container is too short to hold a header")]
    CorruptArtifact,
    /// The header's pad length is outside of `0..=7`.
    #[error("pad length {0} is outside of 0..=7")]
    CorruptPadding(u8),
    /// The marker stream ended, or held an unknown marker, before a
    /// complete tree was parsed.
    #[error("serialized tree is malformed at offset {offset}")]
    CorruptTree {
        /// Offset into the container where parsing failed.
        offset: usize,
    },
    /// The payload bits do not decode to a whole number of symbols.
    #[error("payload is corrupt: {reason}")]
    CorruptPayload {
        /// What went wrong while walking the payload.
        reason: &'static str,
    },
    /// A symbol has no code in the table it is being encoded with.
    #[error("byte {0} is not in the code table")]
    UnknownSymbol(u8),
    /// The node heap ran dry while merging. Only reachable through a bug.
    #[error("heap error while building tree: {0:?}")]
    Heap(HeapErr),
    /// Reading the input or writing the output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<HeapErr> for HuffmanError {
    fn from(e: HeapErr) -> Self {
        HuffmanError::Heap(e)
    }
}
