//! Output quality monitoring.
//!
//! This module provides statistical tests over the emitted bytes and
//! the thresholds used to flag a suspicious run. These are sanity
//! checks, not proofs of entropy.

mod statistics;
mod threshold;

pub use statistics::{StatisticalTests, StatisticsAccumulator};
pub use threshold::{QualityThresholds, ThresholdViolation};
