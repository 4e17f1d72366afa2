//! Quality thresholds for the output report.
//!
//! A violation is reported, never enforced: the filter performs no
//! conditioning, so the best it can do is warn that its input looks
//! unsuitable.

use super::statistics::StatisticalTests;
use serde::{Deserialize, Serialize};

/// Limits beyond which a finished run is reported as suspicious.
///
/// Read from the `[quality]` table of the configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityThresholds {
    /// Largest tolerated distance of the ones fraction from one half.
    pub max_bit_bias: f64,
    /// Smallest tolerated byte variance. Uniform bytes give about 5461.
    pub min_variance: f64,
    /// Largest tolerated lag-1 autocorrelation, either sign.
    pub max_autocorrelation: f64,
    /// Runs shorter than this many bytes are not judged at all.
    pub min_sample_size: u64,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            max_bit_bias: 0.05,
            // A tenth of the uniform variance; catches a stuck column
            min_variance: 500.0,
            max_autocorrelation: 0.3,
            min_sample_size: 256,
        }
    }
}

impl QualityThresholds {
    /// Returns the first limit the run breaks, in the order bias,
    /// variance, autocorrelation.
    ///
    /// Short runs always pass: a few hundred bytes say little about
    /// the source.
    pub fn check(&self, stats: &StatisticalTests) -> Result<(), ThresholdViolation> {
        if stats.sample_size < self.min_sample_size {
            return Ok(());
        }

        if stats.bit_bias.abs() > self.max_bit_bias {
            return Err(ThresholdViolation::BitBias {
                observed: stats.bit_bias,
                limit: self.max_bit_bias,
            });
        }

        if stats.variance < self.min_variance {
            return Err(ThresholdViolation::LowVariance {
                observed: stats.variance,
                limit: self.min_variance,
            });
        }

        if stats.autocorrelation.abs() > self.max_autocorrelation {
            return Err(ThresholdViolation::HighAutocorrelation {
                observed: stats.autocorrelation,
                limit: self.max_autocorrelation,
            });
        }

        Ok(())
    }
}

/// A limit broken by a finished run. Logged, never fatal.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ThresholdViolation {
    /// Ones and zeros are out of balance.
    #[error("output leans toward {}: bit bias {observed:+.4}, limit {limit:.4}", majority(.observed))]
    BitBias {
        /// Measured bias, positive when ones dominate.
        observed: f64,
        /// Configured limit.
        limit: f64,
    },

    /// Bytes cluster around a few values.
    #[error("output bytes barely vary: variance {observed:.1}, expected at least {limit:.1}")]
    LowVariance {
        /// Measured byte variance.
        observed: f64,
        /// Configured limit.
        limit: f64,
    },

    /// Consecutive bytes depend on each other.
    #[error("consecutive output bytes are correlated: {observed:+.4}, limit {limit:.4}")]
    HighAutocorrelation {
        /// Measured lag-1 autocorrelation.
        observed: f64,
        /// Configured limit.
        limit: f64,
    },
}

fn majority(bias: &f64) -> &'static str {
    if *bias > 0.0 {
        "ones"
    } else {
        "zeros"
    }
}
