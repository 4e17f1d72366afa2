//! The `detect` pipeline: raw frames in, one CSV record per decay out.

use super::Interrupt;
use crate::capture::{CaptureError, DecayDetector, DetectorConfig, FrameSource, RawFrameReader};
use std::io::{Read, Write};
use tracing::{debug, info};

/// Summary of a completed detection run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetectReport {
    /// Complete frames scanned.
    pub frames: u64,
    /// Events written.
    pub events: u64,
    /// True if the run stopped on request before the input ran out.
    pub interrupted: bool,
}

/// Runs the decay detector over a raw frame stream.
pub struct Detect {
    detector: DecayDetector,
}

impl Detect {
    /// Creates a detection run with the given geometry and threshold.
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            detector: DecayDetector::new(config),
        }
    }

    /// Scans every frame in `input`, writing one record per event.
    pub fn run<R, W>(&self, input: R, output: W) -> Result<DetectReport, CaptureError>
    where
        R: Read,
        W: Write,
    {
        self.run_until(input, output, &Interrupt::new())
    }

    /// Like [`Detect::run`], stopping before the next frame once
    /// `interrupt` is requested.
    ///
    /// Each record is flushed as soon as it is written so that a
    /// downstream filter sees events as they happen.
    pub fn run_until<R, W>(
        &self,
        input: R,
        mut output: W,
        interrupt: &Interrupt,
    ) -> Result<DetectReport, CaptureError>
    where
        R: Read,
        W: Write,
    {
        let mut frames = RawFrameReader::new(input, self.detector.config())?;
        let mut report = DetectReport::default();

        while let Some(frame) = frames.next_frame()? {
            if let Some(event) = self.detector.detect(&frame) {
                writeln!(output, "{}", event)?;
                output.flush()?;
                report.events += 1;
                debug!(
                    frame = event.frame,
                    brightness = event.brightness,
                    x = event.x,
                    y = event.y,
                    "Decay detected"
                );
            }

            if interrupt.is_requested() {
                report.interrupted = true;
                break;
            }
        }
        report.frames = frames.frames_read();

        output.flush()?;
        info!(
            frames = report.frames,
            events = report.events,
            "Detection finished"
        );

        Ok(report)
    }
}
