//! Detector configuration.
//!
//! Frame geometry must match the raw video stream exactly: the stream
//! has no headers, so a wrong width or height silently misaligns every
//! frame after the first.

use serde::{Deserialize, Serialize};

/// Default frame width in pixels.
pub const DEFAULT_WIDTH: u32 = 320;
/// Default frame height in pixels.
pub const DEFAULT_HEIGHT: u32 = 240;
/// Default brightness a pixel must exceed to count as a decay flash.
pub const DEFAULT_THRESHOLD: u8 = 50;

/// Configuration for the decay event detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Rows ignored at the top of each frame.
    pub trim_top: u32,
    /// Rows ignored at the bottom of each frame.
    pub trim_bottom: u32,
    /// Brightness a pixel must exceed to be reported.
    pub threshold: u8,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            trim_top: 0,
            trim_bottom: 0,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl DetectorConfig {
    /// Creates a new configuration with the specified dimensions.
    pub fn with_dimensions(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Returns the size of one frame in bytes.
    #[inline]
    pub fn frame_len(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), DetectorConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(DetectorConfigError::InvalidDimensions);
        }
        if u64::from(self.trim_top) + u64::from(self.trim_bottom) > u64::from(self.height) {
            return Err(DetectorConfigError::TrimExceedsHeight {
                trim: u64::from(self.trim_top) + u64::from(self.trim_bottom),
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Detector configuration validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DetectorConfigError {
    /// Width or height is zero.
    #[error("invalid frame dimensions")]
    InvalidDimensions,
    /// Top and bottom trims together remove more rows than the frame has.
    #[error("trimming {trim} rows exceeds frame height {height}")]
    TrimExceedsHeight {
        /// Rows trimmed in total.
        trim: u64,
        /// Frame height in rows.
        height: u32,
    },
}
