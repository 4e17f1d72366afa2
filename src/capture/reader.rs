//! Frame sources.
//!
//! The camera is driven by an external program that dumps raw frames
//! to a pipe; this module slices that byte stream back into frames.

use super::{DetectorConfig, DetectorConfigError, Frame};
use std::io::{self, Read};
use thiserror::Error;

/// Errors that can occur while reading or scanning frames.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The frame geometry cannot be read.
    #[error("invalid detector configuration: {0}")]
    Config(#[from] DetectorConfigError),
    /// Reading frames or writing records failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

/// Trait for anything that yields frames.
pub trait FrameSource {
    /// Returns the next frame, or `None` at end of stream.
    fn next_frame(&mut self) -> Result<Option<Frame>, CaptureError>;
}

/// Reads fixed-size raw grayscale frames from a byte stream.
///
/// The stream carries no headers: each frame is exactly
/// `width * height` bytes. A trailing partial frame is discarded.
pub struct RawFrameReader<R> {
    reader: R,
    width: u32,
    height: u32,
    sequence: u64,
}

impl<R: Read> RawFrameReader<R> {
    /// Creates a reader for frames of the configured geometry.
    pub fn new(reader: R, config: &DetectorConfig) -> Result<Self, CaptureError> {
        config.validate()?;
        Ok(Self {
            reader,
            width: config.width,
            height: config.height,
            sequence: 0,
        })
    }

    /// Returns the number of complete frames read.
    #[inline]
    pub fn frames_read(&self) -> u64 {
        self.sequence
    }

    /// Fills `buf` as far as possible, returning the number of bytes read.
    fn fill(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }
}

impl<R: Read> FrameSource for RawFrameReader<R> {
    fn next_frame(&mut self) -> Result<Option<Frame>, CaptureError> {
        let mut pixels = vec![0u8; (self.width as usize) * (self.height as usize)];
        let filled = self.fill(&mut pixels)?;

        if filled == 0 {
            return Ok(None);
        }
        if filled < pixels.len() {
            tracing::warn!(
                bytes = filled,
                expected = pixels.len(),
                "Discarding partial frame at end of stream"
            );
            return Ok(None);
        }

        let frame = Frame::new(pixels, self.width, self.height, self.sequence);
        self.sequence += 1;
        Ok(Some(frame))
    }
}
