//! Cumulative mean used as the bit threshold.

use crate::error::FilterError;

/// Running estimate of the mean of every sample observed so far.
///
/// The estimate is cumulative, never windowed or decayed: each
/// observed sample contributes equally for the rest of the run.
/// Under drifting input statistics this lets early samples bias
/// later comparisons.
///
/// The mean is updated in place rather than derived from a running
/// sum, so any sequence of finite samples keeps it finite.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunningEstimate {
    count: u64,
    mean: f64,
}

impl RunningEstimate {
    /// Creates an estimate with no samples observed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a sample.
    pub fn observe(&mut self, sample: f64) {
        self.count += 1;
        let n = self.count as f64;
        // Both quotients are bounded by the inputs; a plain difference is not.
        self.mean += sample / n - self.mean / n;
    }

    /// Returns the current mean.
    ///
    /// Fails if no sample has been observed yet.
    pub fn current(&self) -> Result<f64, FilterError> {
        if self.count == 0 {
            return Err(FilterError::EstimatorNotReady);
        }
        Ok(self.mean)
    }

    /// Returns the number of observed samples.
    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }
}
