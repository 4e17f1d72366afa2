//! Mean-threshold bit extraction.

use super::estimator::RunningEstimate;
use super::warmup::{Origin, Sample};
use crate::error::FilterError;

/// A single extracted bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bit {
    /// Sample below the threshold.
    Zero,
    /// Sample at or above the threshold.
    One,
}

impl Bit {
    /// Maps a sample to a bit: below the threshold is `Zero`,
    /// anything else (ties included) is `One`.
    #[inline]
    pub fn from_threshold(sample: f64, threshold: f64) -> Self {
        if sample < threshold {
            Bit::Zero
        } else {
            Bit::One
        }
    }
}

impl From<Bit> for u8 {
    #[inline]
    fn from(bit: Bit) -> u8 {
        match bit {
            Bit::Zero => 0,
            Bit::One => 1,
        }
    }
}

/// Turns a sample sequence into bits by comparing each sample with
/// the running estimate.
///
/// Each sample is compared against the mean of every sample strictly
/// before it, then live samples are folded into the estimate. Replayed
/// warm-up samples were already observed and are not counted twice.
pub struct BitExtractor<I> {
    samples: I,
    estimate: RunningEstimate,
    emitted: u64,
}

impl<I> BitExtractor<I> {
    /// Creates an extractor from a sample sequence and a seeded estimate.
    pub fn new(samples: I, estimate: RunningEstimate) -> Self {
        Self {
            samples,
            estimate,
            emitted: 0,
        }
    }

    /// Returns the current running estimate.
    #[inline]
    pub fn estimate(&self) -> &RunningEstimate {
        &self.estimate
    }

    /// Returns the number of bits produced so far.
    #[inline]
    pub fn bits_emitted(&self) -> u64 {
        self.emitted
    }
}

impl<I> Iterator for BitExtractor<I>
where
    I: Iterator<Item = Result<Sample, FilterError>>,
{
    type Item = Result<Bit, FilterError>;

    fn next(&mut self) -> Option<Self::Item> {
        let sample = match self.samples.next()? {
            Ok(sample) => sample,
            Err(e) => return Some(Err(e)),
        };

        let threshold = match self.estimate.current() {
            Ok(mean) => mean,
            Err(e) => return Some(Err(e)),
        };

        let bit = Bit::from_threshold(sample.value, threshold);

        if sample.origin == Origin::Live {
            self.estimate.observe(sample.value);
        }
        self.emitted += 1;

        Some(Ok(bit))
    }
}
