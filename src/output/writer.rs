//! Formatted byte sink with periodic flushing.

use super::base64::Base64Encoder;
use super::format::OutputFormat;
use std::io::{self, Write};

/// Default number of bytes between forced flushes.
pub const DEFAULT_BUFFER_SIZE: usize = 64;

/// Writes bytes to an output stream in the selected encoding.
///
/// The stream is flushed after every `buffer_size` bytes (never if
/// zero) and once more by [`FormattedWriter::finish`], which must be
/// called to emit a trailing base64 group.
pub struct FormattedWriter<W: Write> {
    output: W,
    format: OutputFormat,
    encoder: Base64Encoder,
    buffer_size: usize,
    /// Bytes written since construction.
    written: u64,
}

impl<W: Write> FormattedWriter<W> {
    /// Wraps `output`; a `buffer_size` of zero leaves flushing to `finish`.
    pub fn new(output: W, format: OutputFormat, buffer_size: usize) -> Self {
        Self {
            output,
            format,
            encoder: Base64Encoder::new(),
            buffer_size,
            written: 0,
        }
    }

    /// Encodes and writes a single byte.
    pub fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        match self.format {
            OutputFormat::Hex => write!(self.output, "{:02X}", byte)?,
            OutputFormat::Decimal => writeln!(self.output, "{}", byte)?,
            OutputFormat::Binary => write!(self.output, "{:08b}", byte)?,
            OutputFormat::Base64 => {
                if let Some(quantum) = self.encoder.push(byte) {
                    self.output.write_all(&quantum)?;
                }
            }
            OutputFormat::Raw => self.output.write_all(&[byte])?,
        }

        self.written += 1;

        if self.buffer_size > 0 && self.written % self.buffer_size as u64 == 0 {
            self.output.flush()?;
            tracing::trace!(written = self.written, "Flushed output");
        }

        Ok(())
    }

    /// Returns the number of bytes written.
    #[inline]
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Emits any pending base64 tail, flushes, and returns the stream.
    pub fn finish(mut self) -> io::Result<W> {
        let encoder = std::mem::take(&mut self.encoder);
        if let Some(quantum) = encoder.finish() {
            self.output.write_all(&quantum)?;
        }
        self.output.flush()?;
        Ok(self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(format: OutputFormat, data: &[u8]) -> Vec<u8> {
        let mut writer = FormattedWriter::new(Vec::new(), format, DEFAULT_BUFFER_SIZE);
        for &b in data {
            writer.write_byte(b).unwrap();
        }
        writer.finish().unwrap()
    }

    /// Counts flushes reaching the underlying stream.
    #[derive(Default)]
    struct FlushCounter {
        data: Vec<u8>,
        flushes: usize,
    }

    impl Write for FlushCounter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.data.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            self.flushes += 1;
            Ok(())
        }
    }

    #[test]
    fn test_hex_uppercase_no_separator() {
        assert_eq!(render(OutputFormat::Hex, &[0x0A, 0xFF, 0x00]), b"0AFF00");
    }

    #[test]
    fn test_decimal_one_per_line() {
        assert_eq!(render(OutputFormat::Decimal, &[0, 7, 255]), b"0\n7\n255\n");
    }

    #[test]
    fn test_binary_msb_first() {
        assert_eq!(render(OutputFormat::Binary, &[0x80, 0x05]), b"1000000000000101");
    }

    #[test]
    fn test_base64_padded_at_finish() {
        assert_eq!(render(OutputFormat::Base64, b"foob"), b"Zm9vYg==");
    }

    #[test]
    fn test_base64_streams_complete_groups() {
        let mut writer = FormattedWriter::new(Vec::new(), OutputFormat::Base64, 0);
        for &b in b"food" {
            writer.write_byte(b).unwrap();
        }
        // Only the first group is out before finish
        assert_eq!(writer.output, b"Zm9v");
        assert_eq!(writer.finish().unwrap(), b"Zm9vZA==");
    }

    #[test]
    fn test_raw_verbatim() {
        let data: Vec<u8> = (0..=255).collect();
        assert_eq!(render(OutputFormat::Raw, &data), data);
    }

    #[test]
    fn test_flush_cadence() {
        let mut writer = FormattedWriter::new(FlushCounter::default(), OutputFormat::Raw, 4);
        for b in 0..10u8 {
            writer.write_byte(b).unwrap();
        }
        assert_eq!(writer.output.flushes, 2);

        // Final flush is unconditional
        let sink = writer.finish().unwrap();
        assert_eq!(sink.flushes, 3);
        assert_eq!(sink.data.len(), 10);
    }

    #[test]
    fn test_zero_buffer_size_disables_periodic_flush() {
        let mut writer = FormattedWriter::new(FlushCounter::default(), OutputFormat::Hex, 0);
        for b in 0..100u8 {
            writer.write_byte(b).unwrap();
        }
        assert_eq!(writer.output.flushes, 0);
        assert_eq!(writer.written(), 100);
        assert_eq!(writer.finish().unwrap().flushes, 1);
    }
}
