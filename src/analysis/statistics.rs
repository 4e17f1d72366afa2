//! Statistical sanity checks on the output stream.
//!
//! These tests detect obvious problems (a stuck sensor, a wrong column),
//! not proofs of entropy quality. Passing them is necessary but not
//! sufficient for good output.

/// Statistical test results.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatisticalTests {
    /// Bit bias (fraction of ones minus 0.5).
    pub bit_bias: f64,
    /// Byte-level variance.
    pub variance: f64,
    /// Lag-1 autocorrelation.
    pub autocorrelation: f64,
    /// Number of bytes analyzed.
    pub sample_size: u64,
}

/// Accumulates byte statistics in constant memory.
///
/// Only running sums are kept, so the output stream never has to be
/// buffered to be analyzed. Sums are exact integers.
#[derive(Debug, Clone, Default)]
pub struct StatisticsAccumulator {
    count: u64,
    ones: u64,
    sum: u64,
    sum_squares: u64,
    /// Sum of products of consecutive bytes.
    sum_lagged: u64,
    first: Option<u8>,
    last: Option<u8>,
}

impl StatisticsAccumulator {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one output byte.
    pub fn push(&mut self, byte: u8) {
        let x = u64::from(byte);

        self.count += 1;
        self.ones += u64::from(byte.count_ones());
        self.sum += x;
        self.sum_squares += x * x;

        if let Some(prev) = self.last {
            self.sum_lagged += u64::from(prev) * x;
        }
        if self.first.is_none() {
            self.first = Some(byte);
        }
        self.last = Some(byte);
    }

    /// Computes the test results for everything pushed so far.
    pub fn summary(&self) -> StatisticalTests {
        StatisticalTests {
            bit_bias: self.bit_bias(),
            variance: self.variance(),
            autocorrelation: self.autocorrelation(),
            sample_size: self.count,
        }
    }

    fn bit_bias(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        (self.ones as f64 / (self.count * 8) as f64) - 0.5
    }

    /// Sum of squared deviations from the mean.
    fn squared_deviations(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        let n = u128::from(self.count);
        let s = u128::from(self.sum);
        let numerator = n * u128::from(self.sum_squares) - s * s;
        numerator as f64 / n as f64
    }

    fn variance(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.squared_deviations() / self.count as f64
    }

    /// Lag-1 autocorrelation: covariance of consecutive bytes over
    /// the total squared deviation.
    fn autocorrelation(&self) -> f64 {
        let (Some(first), Some(last)) = (self.first, self.last) else {
            return 0.0;
        };
        if self.count < 2 {
            return 0.0;
        }

        let deviations = self.squared_deviations();
        if deviations == 0.0 {
            return 1.0; // All same value = perfect correlation
        }

        let n = self.count as f64;
        let mean = self.sum as f64 / n;
        let sum = self.sum as f64;
        let leading = sum - f64::from(last);
        let trailing = sum - f64::from(first);

        let covariance =
            self.sum_lagged as f64 - mean * (leading + trailing) + (n - 1.0) * mean * mean;

        covariance / deviations
    }
}
