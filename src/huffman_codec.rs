use std::io::{Read, Write};
use std::time::Instant;

use crate::bit_vec::{BitReader, BitVec};
use crate::code_table::CodeTable;
use crate::container::Container;
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::hufftree::{HuffNode, HuffmanTree};
use crate::report::CompressionReport;

/// A tree and the code table derived from it.
///
/// Most callers want [`HuffmanCodec::compress`] and
/// [`HuffmanCodec::decompress`], which build a fresh codec per call.
#[derive(Debug, Clone)]
pub struct HuffmanCodec {
    tree: HuffmanTree,
    encode_table: CodeTable,
}

/// Position of the decoding walk. Mid-code it rests on an internal node,
/// represented by that node's children.
enum Walk<'a> {
    AtRoot,
    Descending {
        left: &'a HuffNode,
        right: &'a HuffNode,
    },
}

impl HuffmanCodec {
    pub fn new(tree: HuffmanTree) -> Self {
        let encode_table = CodeTable::from_tree(&tree);
        HuffmanCodec { tree, encode_table }
    }

    /// Build the codec that is optimal for `data`.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let frequencies = FrequencyTable::from_bytes(data);
        let tree = HuffmanTree::from_frequencies(&frequencies)?;

        tracing::debug!(
            distinct_symbols = frequencies.len(),
            total_symbols = frequencies.total(),
            "built tree"
        );

        Ok(Self::new(tree))
    }

    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    pub fn code_table(&self) -> &CodeTable {
        &self.encode_table
    }

    /// Pack `data` with this codec's table and wrap it in a container.
    pub fn encode(&self, data: &[u8]) -> Result<Vec<u8>> {
        if data.is_empty() {
            return Err(HuffmanError::EmptyInput);
        }

        let mut bit_vec = BitVec::new();
        for &byte in data {
            let code = self
                .encode_table
                .get(byte)
                .ok_or(HuffmanError::UnknownSymbol(byte))?;
            bit_vec.push_code(code);
        }

        let payload_bits = bit_vec.bit_count();
        let (payload, pad_length) = bit_vec.finish();
        let tree_data = self.tree.serialize();

        tracing::debug!(
            payload_bits,
            pad_length,
            tree_len = tree_data.len(),
            payload_len = payload.len(),
            "packed payload"
        );

        Ok(Container::assemble(pad_length, &tree_data, &payload))
    }

    /// Compress `data` into a self-describing container.
    #[tracing::instrument(skip_all, fields(len = data.len()))]
    pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
        Self::from_bytes(data)?.encode(data)
    }

    /// Recover the original bytes from a container built by
    /// [`HuffmanCodec::compress`].
    #[tracing::instrument(skip_all, fields(len = container.len()))]
    pub fn decompress(container: &[u8]) -> Result<Vec<u8>> {
        let result = Container::parse(container).and_then(|parsed| Self::decode(&parsed));
        if let Err(error) = &result {
            tracing::warn!(%error, "rejected container");
        }
        result
    }

    /// Walk the tree bit by bit, emitting a symbol at every leaf.
    pub fn decode(container: &Container<'_>) -> Result<Vec<u8>> {
        let bits = BitReader::new(container.payload, container.pad_length).ok_or(
            HuffmanError::CorruptPayload {
                reason: "padding does not match the payload",
            },
        )?;
        if bits.bit_count() == 0 {
            return Err(HuffmanError::CorruptPayload {
                reason: "payload holds no bits",
            });
        }

        let mut result = Vec::new();

        let (root_left, root_right) = match &container.tree.root {
            // A lone leaf was encoded with the one-bit code `0`.
            HuffNode::Leaf { symbol } => {
                for bit in bits {
                    if bit {
                        return Err(HuffmanError::CorruptPayload {
                            reason: "unexpected bit for a single-symbol tree",
                        });
                    }
                    result.push(*symbol);
                }
                return Ok(result);
            }
            HuffNode::Internal { left, right, .. } => (left.as_ref(), right.as_ref()),
        };

        let mut walk = Walk::AtRoot;
        for bit in bits {
            let (left, right) = match walk {
                Walk::AtRoot => (root_left, root_right),
                Walk::Descending { left, right } => (left, right),
            };

            walk = match if bit { right } else { left } {
                HuffNode::Leaf { symbol } => {
                    result.push(*symbol);
                    Walk::AtRoot
                }
                HuffNode::Internal { left, right, .. } => Walk::Descending {
                    left: left.as_ref(),
                    right: right.as_ref(),
                },
            };
        }

        match walk {
            Walk::AtRoot => Ok(result),
            Walk::Descending { .. } => Err(HuffmanError::CorruptPayload {
                reason: "bits ran out in the middle of a code",
            }),
        }
    }

    pub fn compress_with_report(data: &[u8]) -> Result<(Vec<u8>, CompressionReport)> {
        let start = Instant::now();
        let compressed = Self::compress(data)?;
        let report = CompressionReport::new(data.len(), compressed.len(), start.elapsed());
        tracing::info!(%report, "compressed");
        Ok((compressed, report))
    }

    pub fn decompress_with_report(container: &[u8]) -> Result<(Vec<u8>, CompressionReport)> {
        let start = Instant::now();
        let decompressed = Self::decompress(container)?;
        let report = CompressionReport::new(container.len(), decompressed.len(), start.elapsed());
        tracing::info!(%report, "decompressed");
        Ok((decompressed, report))
    }

    /// Read all of `input`, compress it and write the container to `output`.
    pub fn encode_from_file<R: Read, W: Write>(
        mut input: R,
        mut output: W,
    ) -> Result<CompressionReport> {
        let mut data = Vec::new();
        input.read_to_end(&mut data)?;
        let (compressed, report) = Self::compress_with_report(&data)?;
        output.write_all(&compressed)?;
        output.flush()?;
        Ok(report)
    }

    /// Read a whole container from `input` and write the decoded bytes to
    /// `output`.
    pub fn decode_from_file<R: Read, W: Write>(
        mut input: R,
        mut output: W,
    ) -> Result<CompressionReport> {
        let mut data = Vec::new();
        input.read_to_end(&mut data)?;
        let (decompressed, report) = Self::decompress_with_report(&data)?;
        output.write_all(&decompressed)?;
        output.flush()?;
        Ok(report)
    }
}
