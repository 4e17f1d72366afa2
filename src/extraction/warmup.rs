//! Warm-up phase and the two-phase sample sequence.
//!
//! The threshold is meaningless until some samples have been averaged,
//! but the warm-up samples are still valuable entropy. They are held
//! back while the estimate is seeded and then replayed ahead of the
//! live remainder of the input, so the bit extractor sees one
//! continuous sequence.

use super::budget::SampleBudget;
use super::estimator::RunningEstimate;
use crate::error::FilterError;

/// Where a sample in the combined sequence came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Read during warm-up; already folded into the estimate.
    Replay,
    /// Read after warm-up; not yet observed by the estimate.
    Live,
}

/// A sample tagged with its origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Decoded sample value.
    pub value: f64,
    /// Whether the estimate has seen this sample.
    pub origin: Origin,
}

impl Sample {
    /// A warm-up sample being replayed.
    #[inline]
    pub fn replayed(value: f64) -> Self {
        Self {
            value,
            origin: Origin::Replay,
        }
    }

    /// A sample read after warm-up.
    #[inline]
    pub fn live(value: f64) -> Self {
        Self {
            value,
            origin: Origin::Live,
        }
    }
}

/// Buffered warm-up samples followed by the live tail of the source,
/// bounded by the sample budget.
pub struct SampleSequence<I> {
    backlog: std::vec::IntoIter<f64>,
    live: I,
    /// Samples still allowed, `None` if unbounded.
    remaining: Option<u64>,
}

impl<I> Iterator for SampleSequence<I>
where
    I: Iterator<Item = Result<f64, FilterError>>,
{
    type Item = Result<Sample, FilterError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == Some(0) {
            return None;
        }

        let item = match self.backlog.next() {
            Some(value) => Ok(Sample::replayed(value)),
            None => self.live.next()?.map(Sample::live),
        };

        if let Some(remaining) = self.remaining.as_mut() {
            *remaining -= 1;
        }
        Some(item)
    }
}

/// Reads the warm-up population and seeds the running estimate.
///
/// Reads `min(budget, max(min_samples, 1))` samples: at least one sample
/// is always required so the estimate is defined before the first bit.
/// If the source runs dry first, the run continues with what was read.
pub fn warm_up<I>(
    mut source: I,
    min_samples: usize,
    budget: SampleBudget,
) -> Result<(SampleSequence<I>, RunningEstimate), FilterError>
where
    I: Iterator<Item = Result<f64, FilterError>>,
{
    let target = budget.cap(min_samples.max(1) as u64);

    let mut estimate = RunningEstimate::new();
    let mut backlog = Vec::new();

    for sample in source.by_ref().take(target as usize) {
        let sample = sample?;
        estimate.observe(sample);
        backlog.push(sample);
    }

    if (backlog.len() as u64) < target {
        tracing::warn!(
            read = backlog.len(),
            wanted = target,
            "Input exhausted during warm-up"
        );
    }

    let sequence = SampleSequence {
        backlog: backlog.into_iter(),
        live: source,
        remaining: budget.limit(),
    };

    Ok((sequence, estimate))
}
