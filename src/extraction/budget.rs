//! Output length cap expressed as a sample budget.

/// Maximum number of samples a run may consume.
///
/// Each sample yields one bit, so a cap of `n` output bytes
/// allows `8 * n` samples. Fixed once when the pipeline is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SampleBudget {
    limit: Option<u64>,
}

impl SampleBudget {
    /// Creates a budget that consumes until the input is exhausted.
    pub fn unbounded() -> Self {
        Self { limit: None }
    }

    /// Derives the budget from an output length in bytes.
    ///
    /// A length of zero means unbounded.
    pub fn from_length(length_bytes: u64) -> Self {
        if length_bytes == 0 {
            Self::unbounded()
        } else {
            Self {
                limit: Some(length_bytes.saturating_mul(8)),
            }
        }
    }

    /// Returns the sample limit, or `None` if unbounded.
    #[inline]
    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    /// Clamps a sample count to the budget.
    pub fn cap(&self, samples: u64) -> u64 {
        self.limit.map_or(samples, |limit| samples.min(limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_length_unbounded() {
        let budget = SampleBudget::from_length(0);
        assert_eq!(budget.limit(), None);
        assert_eq!(budget.cap(12345), 12345);
    }

    #[test]
    fn test_eight_samples_per_byte() {
        let budget = SampleBudget::from_length(4);
        assert_eq!(budget.limit(), Some(32));
        assert_eq!(budget.cap(100), 32);
        assert_eq!(budget.cap(10), 10);
    }

    #[test]
    fn test_huge_length_saturates() {
        let budget = SampleBudget::from_length(u64::MAX);
        assert_eq!(budget.limit(), Some(u64::MAX));
    }
}
