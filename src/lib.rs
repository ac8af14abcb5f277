//! # huffpack
//!
//! Huffman compression of in-memory byte buffers into a self-describing
//! container: `[pad length][serialized tree][packed payload]`. The tree
//! travels with the payload, so decoding needs no external dictionary.
//!
//! ## Quick Start
//!
//! ```rust
//! let compressed = huffpack::compress(b"abracadabra")?;
//! let restored = huffpack::decompress(&compressed)?;
//! assert_eq!(restored, b"abracadabra");
//! # Ok::<(), huffpack::HuffmanError>(())
//! ```
//!
//! Files and other readers go through [`HuffmanCodec::encode_from_file`]
//! and [`HuffmanCodec::decode_from_file`], which load the whole input
//! before coding it.

pub mod code_table;
pub mod container;
pub mod error;
pub mod frequency;
pub mod huffman_codec;
pub mod hufftree;
pub mod logging;
pub mod report;

// Internal modules - not part of public API
mod bit_vec;
mod min_heap;

// Re-export main types for convenience
pub use code_table::{Code, CodeTable};
pub use container::Container;
pub use error::{HuffmanError, Result};
pub use frequency::FrequencyTable;
pub use huffman_codec::HuffmanCodec;
pub use hufftree::{HuffNode, HuffmanTree};
pub use report::CompressionReport;

/// Compress `data`. Fails with [`HuffmanError::EmptyInput`] on an empty
/// buffer.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    HuffmanCodec::compress(data)
}

/// Decompress a container produced by [`compress`].
pub fn decompress(container: &[u8]) -> Result<Vec<u8>> {
    HuffmanCodec::decompress(container)
}
