use std::cmp::Ordering;
use std::fmt;

use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::min_heap::MinHeap;

/// Marker preceding a leaf's symbol in the serialized tree.
pub const LEAF_MARKER: u8 = 1;
/// Marker for an internal node; its two subtrees follow in preorder.
pub const INTERNAL_MARKER: u8 = 0;

/// A tree over byte symbols never needs more internal nodes than this.
const MAX_INTERNAL_NODES: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    Leaf {
        symbol: u8,
    },
    Internal {
        weight: usize,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffNode::Leaf { .. })
    }
}

/// A node waiting in the heap to be merged.
///
/// Ordered by weight, then by creation order: leaves are numbered in the
/// order their symbol was first seen, merged nodes continue the sequence.
#[derive(Debug)]
struct Pending {
    weight: usize,
    order: usize,
    node: HuffNode,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .cmp(&other.weight)
            .then(self.order.cmp(&other.order))
    }
}

/// A strict binary prefix-code tree.
///
/// A single distinct symbol yields a tree whose root is that leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    pub root: HuffNode,
}

impl HuffmanTree {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(bytes))
    }

    /// Greedily merge the two lightest nodes until one root remains.
    ///
    /// The first node removed becomes the left child, the second the right.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self> {
        if frequencies.is_empty() {
            return Err(HuffmanError::EmptyInput);
        }

        let leaves: Vec<Pending> = frequencies
            .iter()
            .enumerate()
            .map(|(order, (symbol, weight))| Pending {
                weight,
                order,
                node: HuffNode::Leaf { symbol },
            })
            .collect();

        let mut next_order = leaves.len();
        let mut heap = MinHeap::build(leaves)?;

        while heap.heap_size() > 1 {
            let x = heap.extract_min()?;
            let y = heap.extract_min()?;
            let weight = x.weight + y.weight;

            tracing::trace!(
                left = x.order,
                right = y.order,
                weight,
                order = next_order,
                "merged nodes"
            );

            heap.insert(Pending {
                weight,
                order: next_order,
                node: HuffNode::Internal {
                    weight,
                    left: Box::new(x.node),
                    right: Box::new(y.node),
                },
            });
            next_order += 1;
        }

        let root = heap.extract_min()?.node;
        Ok(HuffmanTree { root })
    }

    /// Preorder marker stream: `1, symbol` per leaf, `0` per internal node.
    pub fn serialize(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        let mut stack = vec![&self.root];

        while let Some(node) = stack.pop() {
            match node {
                HuffNode::Leaf { symbol } => {
                    bytes.push(LEAF_MARKER);
                    bytes.push(*symbol);
                }
                HuffNode::Internal { left, right, .. } => {
                    bytes.push(INTERNAL_MARKER);
                    stack.push(right.as_ref());
                    stack.push(left.as_ref());
                }
            }
        }

        bytes
    }

    /// Parse a marker stream beginning at `start`.
    ///
    /// Returns the tree together with the offset of the first byte past
    /// it. Weights are not stored, so rebuilt internal nodes weigh zero.
    pub fn deserialize(data: &[u8], start: usize) -> Result<(HuffmanTree, usize)> {
        // Each pending internal node holds its left subtree once parsed.
        let mut stack: Vec<Option<HuffNode>> = Vec::new();
        let mut cursor = start;
        let mut internals = 0;

        loop {
            let marker = *data
                .get(cursor)
                .ok_or(HuffmanError::CorruptTree { offset: cursor })?;

            let mut node = match marker {
                INTERNAL_MARKER => {
                    internals += 1;
                    if internals > MAX_INTERNAL_NODES {
                        return Err(HuffmanError::CorruptTree { offset: cursor });
                    }
                    stack.push(None);
                    cursor += 1;
                    continue;
                }
                LEAF_MARKER => {
                    let symbol = *data
                        .get(cursor + 1)
                        .ok_or(HuffmanError::CorruptTree { offset: cursor + 1 })?;
                    cursor += 2;
                    HuffNode::Leaf { symbol }
                }
                _ => return Err(HuffmanError::CorruptTree { offset: cursor }),
            };

            // Attach the finished subtree, folding up every parent it completes.
            loop {
                match stack.pop() {
                    None => return Ok((HuffmanTree { root: node }, cursor)),
                    Some(None) => {
                        stack.push(Some(node));
                        break;
                    }
                    Some(Some(left)) => {
                        node = HuffNode::Internal {
                            weight: 0,
                            left: Box::new(left),
                            right: Box::new(node),
                        };
                    }
                }
            }
        }
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes().filter(|node| node.is_leaf()).count()
    }

    pub fn internal_count(&self) -> usize {
        self.nodes().filter(|node| !node.is_leaf()).count()
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(&self.root, 0)];
        while let Some((node, depth)) = stack.pop() {
            match node {
                HuffNode::Leaf { .. } => deepest = deepest.max(depth),
                HuffNode::Internal { left, right, .. } => {
                    stack.push((left.as_ref(), depth + 1));
                    stack.push((right.as_ref(), depth + 1));
                }
            }
        }
        deepest
    }

    fn nodes(&self) -> impl Iterator<Item = &HuffNode> {
        let mut stack = vec![&self.root];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            if let HuffNode::Internal { left, right, .. } = node {
                stack.push(right.as_ref());
                stack.push(left.as_ref());
            }
            Some(node)
        })
    }
}

impl fmt::Display for HuffmanTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![(&self.root, 0, "root")];
        while let Some((node, depth, label)) = stack.pop() {
            let indent = "  ".repeat(depth);
            match node {
                HuffNode::Leaf { symbol } => {
                    writeln!(f, "{indent}{label}-> Leaf: {:?} ({symbol})", *symbol as char)?;
                }
                HuffNode::Internal { weight, left, right } => {
                    writeln!(f, "{indent}{label}-> Internal [weight: {weight}]")?;
                    stack.push((right.as_ref(), depth + 1, "R"));
                    stack.push((left.as_ref(), depth + 1, "L"));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(symbol: u8) -> HuffNode {
        HuffNode::Leaf { symbol }
    }

    fn internal(weight: usize, left: HuffNode, right: HuffNode) -> HuffNode {
        HuffNode::Internal {
            weight,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    #[test]
    fn two_symbols_make_one_internal_node() {
        let tree = HuffmanTree::from_bytes(b"AAAB").unwrap();
        // B is lighter, so it is removed first and lands on the left.
        assert_eq!(tree.root, internal(4, leaf(b'B'), leaf(b'A')));
        assert_eq!(tree.leaf_count(), 2);
        assert_eq!(tree.internal_count(), 1);
        assert_eq!(tree.depth(), 1);
    }

    #[test]
    fn equal_weights_break_ties_by_first_encounter() {
        // a, b, c all weigh 1: a and b merge first, then c joins the
        // merged node. c is a leaf created before the merged node, but
        // weighs 1 against 2 so it goes left.
        let tree = HuffmanTree::from_bytes(b"abc").unwrap();
        assert_eq!(
            tree.root,
            internal(3, leaf(b'c'), internal(2, leaf(b'a'), leaf(b'b')))
        );

        // With four equal leaves the two merged nodes tie at weight 2 and
        // the older one goes left.
        let tree = HuffmanTree::from_bytes(b"dcba").unwrap();
        assert_eq!(
            tree.root,
            internal(
                4,
                internal(2, leaf(b'd'), leaf(b'c')),
                internal(2, leaf(b'b'), leaf(b'a'))
            )
        );
    }

    #[test]
    fn leaf_wins_ties_against_later_internal_nodes() {
        // x and y merge into weight 2, which ties with z. z was created
        // first, so it is removed first and becomes the left child.
        let tree = HuffmanTree::from_bytes(b"xyzz").unwrap();
        assert_eq!(
            tree.root,
            internal(4, leaf(b'z'), internal(2, leaf(b'x'), leaf(b'y')))
        );
    }

    #[test]
    fn single_symbol_tree_is_a_bare_leaf() {
        let tree = HuffmanTree::from_bytes(&[0x41; 50]).unwrap();
        assert_eq!(tree.root, leaf(0x41));
        assert_eq!(tree.leaf_count(), 1);
        assert_eq!(tree.internal_count(), 0);
        assert_eq!(tree.serialize(), vec![LEAF_MARKER, 0x41]);
    }

    #[test]
    fn empty_table_is_rejected() {
        assert!(matches!(
            HuffmanTree::from_bytes(&[]),
            Err(HuffmanError::EmptyInput)
        ));
    }

    #[test]
    fn serialize_writes_preorder_markers() {
        let tree = HuffmanTree::from_bytes(b"xyzz").unwrap();
        assert_eq!(tree.serialize(), vec![0, 1, b'z', 0, 1, b'x', 1, b'y']);
    }

    #[test]
    fn deserialize_reports_where_the_tree_ends() {
        let tree = HuffmanTree::from_bytes(b"hello world").unwrap();
        let mut data = vec![3];
        data.extend(tree.serialize());
        let tree_end = data.len();
        data.extend([0xAB, 0xCD]);

        let (parsed, end) = HuffmanTree::deserialize(&data, 1).unwrap();
        assert_eq!(end, tree_end);
        assert_eq!(parsed.serialize(), tree.serialize());
        assert_eq!(parsed.leaf_count(), tree.leaf_count());
    }

    #[test]
    fn full_alphabet_tree_shape() {
        let bytes: Vec<u8> = (0..=255).collect();
        let tree = HuffmanTree::from_bytes(&bytes).unwrap();
        assert_eq!(tree.leaf_count(), 256);
        assert_eq!(tree.internal_count(), 255);
        assert_eq!(tree.depth(), 8);

        let serialized = tree.serialize();
        assert_eq!(serialized.len(), 256 * 2 + 255);
        let (parsed, end) = HuffmanTree::deserialize(&serialized, 0).unwrap();
        assert_eq!(end, serialized.len());
        assert_eq!(parsed.leaf_count(), 256);
    }

    #[test]
    fn truncated_marker_stream_is_corrupt() {
        let serialized = HuffmanTree::from_bytes(b"abcdef").unwrap().serialize();
        for len in 0..serialized.len() {
            let result = HuffmanTree::deserialize(&serialized[..len], 0);
            assert!(
                matches!(result, Err(HuffmanError::CorruptTree { .. })),
                "prefix of length {len} parsed"
            );
        }
    }

    #[test]
    fn unknown_marker_is_corrupt() {
        let result = HuffmanTree::deserialize(&[0, 1, b'a', 7, b'b'], 0);
        assert!(matches!(result, Err(HuffmanError::CorruptTree { offset: 3 })));
    }

    #[test]
    fn runaway_internal_markers_are_bounded() {
        let data = vec![INTERNAL_MARKER; 10_000];
        let result = HuffmanTree::deserialize(&data, 0);
        assert!(matches!(result, Err(HuffmanError::CorruptTree { offset: 255 })));
    }

    #[test]
    fn display_lists_every_node() {
        let tree = HuffmanTree::from_bytes(b"AAAB").unwrap();
        let rendered = tree.to_string();
        assert_eq!(
            rendered,
            "root-> Internal [weight: 4]\n  L-> Leaf: 'B' (66)\n  R-> Leaf: 'A' (65)\n"
        );
    }
}
