use std::fmt;
use std::time::Duration;

/// Size and timing figures for one compress or decompress call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionReport {
    /// Length of the buffer handed to the operation.
    pub original_size: usize,
    /// Length of the buffer it produced.
    pub new_size: usize,
    pub elapsed: Duration,
}

impl CompressionReport {
    pub fn new(original_size: usize, new_size: usize, elapsed: Duration) -> Self {
        CompressionReport {
            original_size,
            new_size,
            elapsed,
        }
    }

    /// `new_size` as a percentage of `original_size`; zero for empty input.
    pub fn ratio_percent(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        self.new_size as f64 / self.original_size as f64 * 100.0
    }
}

impl fmt::Display for CompressionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "original: {} bytes, new: {} bytes, ratio: {:.2}%, time: {}ms",
            self.original_size,
            self.new_size,
            self.ratio_percent(),
            self.elapsed.as_millis()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_ratio_to_two_decimals() {
        let report = CompressionReport::new(3, 2, Duration::from_millis(12));
        assert_eq!(
            report.to_string(),
            "original: 3 bytes, new: 2 bytes, ratio: 66.67%, time: 12ms"
        );
    }

    #[test]
    fn empty_original_has_zero_ratio() {
        let report = CompressionReport::new(0, 5, Duration::ZERO);
        assert_eq!(report.ratio_percent(), 0.0);
    }
}
