//! Debiasing filter: samples in, whitened bytes out.
//!
//! This module turns noisy numeric samples into bytes by comparing each
//! sample with the cumulative mean of the samples before it:
//!
//! ```text
//! SampleSource → warm_up → SampleSequence → BitExtractor → BytePacker
//!                   ↓             (replay, live)     ↑
//!             RunningEstimate ───────────────────────┘
//! ```
//!
//! All stages are lazy iterators over `Result`, so the first error
//! ends the stream and nothing is buffered beyond the warm-up samples.

mod bits;
mod budget;
mod estimator;
mod packer;
mod source;
mod warmup;

pub use bits::{Bit, BitExtractor};
pub use budget::SampleBudget;
pub use estimator::RunningEstimate;
pub use packer::BytePacker;
pub use source::SampleSource;
pub use warmup::{warm_up, Origin, Sample, SampleSequence};
