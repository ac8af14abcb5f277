//! Symbol occurrence counting.

/// Occurrence counts for every byte value seen in a buffer.
///
/// Besides the counts, the table remembers the order in which each symbol
/// was first encountered. Tree construction uses that order to break ties
/// between equal weights, which keeps the resulting tree (and therefore
/// the compressed output) identical from run to run.
#[derive(Debug, Clone)]
pub struct FrequencyTable {
    counts: [usize; 256],
    first_seen: Vec<u8>,
}

impl FrequencyTable {
    /// Tally every byte of `bytes` in a single pass.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut table = FrequencyTable {
            counts: [0; 256],
            first_seen: Vec::new(),
        };

        for &byte in bytes {
            let count = &mut table.counts[byte as usize];
            if *count == 0 {
                table.first_seen.push(byte);
            }
            *count += 1;
        }

        table
    }

    /// Number of distinct symbols present.
    pub fn len(&self) -> usize {
        self.first_seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first_seen.is_empty()
    }

    /// Occurrence count of `symbol`, zero if it never appeared.
    pub fn count(&self, symbol: u8) -> usize {
        self.counts[symbol as usize]
    }

    /// Total number of symbols tallied.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// `(symbol, count)` pairs in first-encounter order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, usize)> + '_ {
        self.first_seen
            .iter()
            .map(move |&symbol| (symbol, self.counts[symbol as usize]))
    }
}
