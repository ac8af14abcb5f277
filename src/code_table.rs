//! Symbol to bit-string mapping derived from a [`HuffmanTree`].

use std::collections::BTreeMap;
use std::fmt;

use crate::hufftree::{HuffNode, HuffmanTree};

/// A variable-length code, most significant (first emitted) bit first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Whether `self` is a prefix of `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }

    fn with_bit(&self, bit: bool) -> Code {
        let mut bits = Vec::with_capacity(self.bits.len() + 1);
        bits.extend_from_slice(&self.bits);
        bits.push(bit);
        Code { bits }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Prefix-free code for every symbol in a tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, Code>,
}

impl CodeTable {
    /// Walk the tree depth-first, appending `0` going left and `1` going
    /// right.
    ///
    /// A tree that is a single leaf would get an empty code, which can
    /// never be written or read back, so that leaf is given the code `0`.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = BTreeMap::new();

        if let HuffNode::Leaf { symbol } = tree.root {
            codes.insert(symbol, Code { bits: vec![false] });
            return CodeTable { codes };
        }

        let mut stack = vec![(&tree.root, Code::default())];
        while let Some((node, code)) = stack.pop() {
            match node {
                HuffNode::Leaf { symbol } => {
                    codes.insert(*symbol, code);
                }
                HuffNode::Internal { left, right, .. } => {
                    stack.push((right.as_ref(), code.with_bit(true)));
                    stack.push((left.as_ref(), code.with_bit(false)));
                }
            }
        }

        CodeTable { codes }
    }

    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> {
        self.codes.iter().map(|(&symbol, code)| (symbol, code))
    }

    /// True when no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&Code> = self.codes.values().collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !a.is_prefix_of(b))
        })
    }
}
