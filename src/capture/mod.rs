//! Raw frame input and decay event detection.
//!
//! This module turns a raw video stream from a camera pointed at a
//! radioactive source into one CSV record per detected flash. The
//! camera is treated as a detector of events, not as a source of
//! entropy directly: the randomness lies in when and where decays occur.

mod config;
mod detector;
mod frame;
mod reader;

pub use config::{DetectorConfig, DetectorConfigError, DEFAULT_HEIGHT, DEFAULT_THRESHOLD, DEFAULT_WIDTH};
pub use detector::{DecayDetector, DecayEvent};
pub use frame::Frame;
pub use reader::{CaptureError, FrameSource, RawFrameReader};
