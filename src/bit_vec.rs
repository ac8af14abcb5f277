use crate::code_table::Code;

/// Append-only bit sequence packed MSB-first into bytes.
#[derive(Default, Debug)]
pub struct BitVec {
    bits: Vec<u8>,
    bit_count: usize,
}

impl BitVec {
    pub fn new() -> Self {
        BitVec {
            bits: Vec::new(),
            bit_count: 0,
        }
    }

    pub fn bit_count(&self) -> usize {
        self.bit_count
    }

    fn push_bit(&mut self, bit: bool) {
        let byte_index = self.bit_count / 8; // which byte is target?
        let bit_offset = self.bit_count % 8; // which bit position is target?

        // make a new byte if needed
        if byte_index >= self.bits.len() {
            self.bits.push(0);
        }

        if bit {
            self.bits[byte_index] |= 1 << (7 - bit_offset);
        }

        self.bit_count += 1;
    }

    pub fn push_code(&mut self, code: &Code) {
        for &bit in code.bits() {
            self.push_bit(bit);
        }
    }

    /// Zero bits needed to fill out the last byte.
    pub fn pad_length(&self) -> u8 {
        ((8 - self.bit_count % 8) % 8) as u8
    }

    /// The packed bytes and the number of padding bits in the last one.
    ///
    /// Unset bits are already zero, so the padding needs no extra work.
    pub fn finish(self) -> (Vec<u8>, u8) {
        let pad_length = self.pad_length();
        (self.bits, pad_length)
    }
}

/// Reads back the bits written by [`BitVec`], minus the padding.
#[derive(Debug)]
pub struct BitReader<'a> {
    bytes: &'a [u8],
    position: usize,
    bit_count: usize,
}

impl<'a> BitReader<'a> {
    /// `None` when `pad_length` does not fit in the payload or any padding
    /// bit is set.
    pub fn new(bytes: &'a [u8], pad_length: u8) -> Option<Self> {
        if pad_length > 7 {
            return None;
        }
        let pad_length = pad_length as usize;
        let bit_count = (bytes.len() * 8).checked_sub(pad_length)?;

        if pad_length > 0 {
            let last = *bytes.last()?;
            if last & ((1u8 << pad_length) - 1) != 0 {
                return None;
            }
        }

        Some(BitReader {
            bytes,
            position: 0,
            bit_count,
        })
    }

    pub fn bit_count(&self) -> usize {
        self.bit_count
    }
}

impl Iterator for BitReader<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.position >= self.bit_count {
            return None;
        }
        let byte = self.bytes[self.position / 8];
        let bit = (byte >> (7 - self.position % 8)) & 1 == 1;
        self.position += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bit_count - self.position;
        (remaining, Some(remaining))
    }
}
