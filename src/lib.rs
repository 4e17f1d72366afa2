//! Radioactive Decay Random Bit Library
//!
//! Extracts random bits from radioactive decay observed by a camera
//! pointed at a radioactive source. Each decay shows up as a brief flash;
//! the brightness and timing of the flashes are noisy physical samples
//! that are whitened into a random bitstream.
//!
//! # Architecture
//!
//! The system follows an explicit data flow in two stages, usually
//! connected by a pipe:
//!
//! ```text
//! capture (detect) → CSV records → extraction (filter) → output
//!                                         ↓
//!                                 analysis (quality report)
//! ```
//!
//! The filter compares every sample with the cumulative mean of the
//! samples before it and emits `1` when the sample is at or above the
//! mean, `0` otherwise. Eight bits make one byte, most significant
//! bit first.
//!
//! # Design Principles
//!
//! - **Single pass**: no output byte depends on samples after it
//! - **No skipped records**: a malformed record aborts the run
//! - **Deterministic**: identical input and configuration give identical output
//! - **No cryptographic claims**: debiasing is a mean threshold, not a hash
//!
//! # Example
//!
//! ```
//! use decay_rng::{Filter, FilterConfig, OutputFormat};
//! use std::io::Cursor;
//!
//! let input: String = (0..64).map(|i| format!("{},{}\n", i, (i * 37) % 101)).collect();
//! let config = FilterConfig {
//!     column: 1,
//!     min_samples: 16,
//!     format: OutputFormat::Hex,
//!     ..Default::default()
//! };
//!
//! let mut output = Vec::new();
//! let report = Filter::new(config).run(Cursor::new(input), &mut output).unwrap();
//!
//! assert_eq!(report.bytes_written, 8);
//! assert_eq!(output.len(), 16);
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod analysis;
pub mod capture;
pub mod config;
pub mod error;
pub mod extraction;
pub mod output;
pub mod pipeline;

// Re-export commonly used types at crate root
pub use analysis::{QualityThresholds, StatisticalTests};
pub use capture::{DecayDetector, DecayEvent, DetectorConfig, Frame};
pub use config::{FileConfig, FilterConfig};
pub use error::FilterError;
pub use extraction::{RunningEstimate, SampleBudget};
pub use output::OutputFormat;
pub use pipeline::{Detect, DetectReport, Filter, FilterReport, Interrupt};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
