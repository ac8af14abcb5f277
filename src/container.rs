//! The compressed artifact: `[pad length][serialized tree][payload]`.
//!
//! No length field separates the tree from the payload. The tree's marker
//! stream is self-delimiting, so the payload starts wherever the tree
//! parser stops.

use crate::error::{HuffmanError, Result};
use crate::hufftree::HuffmanTree;

/// Size of the fixed header, which holds only the pad length.
pub const HEADER_LEN: usize = 1;

/// Largest valid pad length; padding only ever completes a partial byte.
pub const MAX_PAD_LENGTH: u8 = 7;

/// A container split into its three regions.
#[derive(Debug, Clone)]
pub struct Container<'a> {
    /// Zero bits appended to the last payload byte.
    pub pad_length: u8,
    /// The decoding tree rebuilt from the marker stream.
    pub tree: HuffmanTree,
    /// Length of the marker stream in bytes.
    pub tree_len: usize,
    /// The packed code bits.
    pub payload: &'a [u8],
}

impl<'a> Container<'a> {
    /// Lay out the three regions back to back.
    pub fn assemble(pad_length: u8, tree_data: &[u8], payload: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(HEADER_LEN + tree_data.len() + payload.len());
        bytes.push(pad_length);
        bytes.extend_from_slice(tree_data);
        bytes.extend_from_slice(payload);
        bytes
    }

    /// Validate the header and parse the tree, locating the payload.
    pub fn parse(bytes: &'a [u8]) -> Result<Self> {
        let pad_length = *bytes.first().ok_or(HuffmanError::CorruptArtifact)?;
        if pad_length > MAX_PAD_LENGTH {
            return Err(HuffmanError::CorruptPadding(pad_length));
        }

        let (tree, payload_start) = HuffmanTree::deserialize(bytes, HEADER_LEN)?;

        Ok(Container {
            pad_length,
            tree,
            tree_len: payload_start - HEADER_LEN,
            payload: &bytes[payload_start..],
        })
    }

    /// Number of meaningful bits in the payload.
    pub fn payload_bits(&self) -> usize {
        (self.payload.len() * 8).saturating_sub(self.pad_length as usize)
    }
}
