//! Decay flash detection.
//!
//! A decay event shows up as a single bright speck in an otherwise dark
//! frame. The detector reports the brightest pixel of each frame whose
//! peak clears the threshold.

use super::{DetectorConfig, Frame};
use std::fmt;

/// One detected decay event.
///
/// Displays as the CSV record `frame,brightness,x,y` consumed by the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecayEvent {
    /// Sequence number of the frame.
    pub frame: u64,
    /// Peak pixel value.
    pub brightness: u8,
    /// Column of the peak pixel.
    pub x: u32,
    /// Row of the peak pixel, counted from the top of the untrimmed frame.
    pub y: u32,
}

impl fmt::Display for DecayEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.frame, self.brightness, self.x, self.y)
    }
}

/// Scans frames for decay flashes.
pub struct DecayDetector {
    config: DetectorConfig,
}

impl DecayDetector {
    /// Creates a detector for frames of the configured geometry.
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// Returns the detector configuration.
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Returns the event in `frame`, if any.
    ///
    /// Only rows inside the trimmed band are scanned. When several pixels
    /// share the peak value the first in scan order is reported. A frame
    /// whose buffer does not match its dimensions is skipped.
    pub fn detect(&self, frame: &Frame) -> Option<DecayEvent> {
        if !frame.is_valid() {
            tracing::warn!(
                frame = frame.sequence(),
                bytes = frame.pixels().len(),
                expected = frame.pixel_count(),
                "Skipping frame with mismatched size"
            );
            return None;
        }

        let first_row = self.config.trim_top;
        let last_row = frame.height().saturating_sub(self.config.trim_bottom);

        let mut peak = 0u8;
        let mut position = (0u32, 0u32);
        let mut total = 0u64;

        for y in first_row..last_row {
            for (x, &value) in frame.row(y).iter().enumerate() {
                total += u64::from(value);
                if value > peak {
                    peak = value;
                    position = (x as u32, y);
                }
            }
        }

        let scanned = u64::from(last_row.saturating_sub(first_row)) * u64::from(frame.width());
        if scanned > 0 {
            tracing::trace!(
                frame = frame.sequence(),
                peak,
                mean = total as f64 / scanned as f64,
                "Scanned frame"
            );
        }

        (peak > self.config.threshold).then(|| DecayEvent {
            frame: frame.sequence(),
            brightness: peak,
            x: position.0,
            y: position.1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_with(width: u32, height: u32, sequence: u64, lit: &[(u32, u32, u8)]) -> Frame {
        let mut pixels = vec![10u8; (width * height) as usize];
        for &(x, y, value) in lit {
            pixels[(y * width + x) as usize] = value;
        }
        Frame::new(pixels, width, height, sequence)
    }

    #[test]
    fn test_dark_frame_no_event() {
        let detector = DecayDetector::new(DetectorConfig::with_dimensions(8, 8));
        assert!(detector.detect(&frame_with(8, 8, 0, &[])).is_none());
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let detector = DecayDetector::new(DetectorConfig::with_dimensions(8, 8));

        assert!(detector.detect(&frame_with(8, 8, 0, &[(1, 1, 50)])).is_none());
        assert!(detector.detect(&frame_with(8, 8, 0, &[(1, 1, 51)])).is_some());
    }

    #[test]
    fn test_reports_brightest_pixel() {
        let detector = DecayDetector::new(DetectorConfig::with_dimensions(8, 8));
        let frame = frame_with(8, 8, 42, &[(2, 3, 120), (6, 5, 200)]);

        let event = detector.detect(&frame).unwrap();
        assert_eq!(
            event,
            DecayEvent {
                frame: 42,
                brightness: 200,
                x: 6,
                y: 5
            }
        );
        assert_eq!(event.to_string(), "42,200,6,5");
    }

    #[test]
    fn test_first_peak_wins_ties() {
        let detector = DecayDetector::new(DetectorConfig::with_dimensions(8, 8));
        let frame = frame_with(8, 8, 0, &[(5, 1, 99), (0, 4, 99)]);

        let event = detector.detect(&frame).unwrap();
        assert_eq!((event.x, event.y), (5, 1));
    }

    #[test]
    fn test_mismatched_frame_skipped() {
        let detector = DecayDetector::new(DetectorConfig::with_dimensions(8, 8));
        let frame = Frame::new(vec![255u8; 20], 8, 8, 3);

        assert!(detector.detect(&frame).is_none());
    }

    #[test]
    fn test_trimmed_rows_ignored() {
        let config = DetectorConfig {
            trim_top: 2,
            trim_bottom: 2,
            ..DetectorConfig::with_dimensions(8, 8)
        };
        let detector = DecayDetector::new(config);

        // Flashes in the trimmed bands are invisible
        assert!(detector.detect(&frame_with(8, 8, 0, &[(0, 1, 255), (0, 6, 255)])).is_none());

        let event = detector.detect(&frame_with(8, 8, 0, &[(3, 2, 255)])).unwrap();
        assert_eq!((event.x, event.y), (3, 2));
    }
}
