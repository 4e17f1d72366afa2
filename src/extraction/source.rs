//! Sample decoding from delimited text records.
//!
//! Each input line is one record produced by the event detector.
//! A single column is selected and parsed as a floating-point sample;
//! the remaining fields are ignored.

use crate::error::{FilterError, RecordFault};
use std::io::BufRead;

/// Lazily decodes one numeric column from a line-oriented stream.
///
/// The sequence ends when the input is exhausted or after the first
/// error; it cannot be restarted.
pub struct SampleSource<R> {
    reader: R,
    column: usize,
    delimiter: String,
    /// Reused line buffer. Lines are read as bytes so that invalid
    /// UTF-8 is reported against its line number.
    line: Vec<u8>,
    /// 1-based number of the last line read.
    line_number: u64,
    finished: bool,
}

impl<R: BufRead> SampleSource<R> {
    /// Creates a source reading `column` (zero-based) from `reader`.
    pub fn new(reader: R, column: usize, delimiter: impl Into<String>) -> Self {
        Self {
            reader,
            column,
            delimiter: delimiter.into(),
            line: Vec::new(),
            line_number: 0,
            finished: false,
        }
    }

    fn parse_line(&self) -> Result<f64, FilterError> {
        let text = String::from_utf8_lossy(&self.line);
        let record = text.trim_end_matches(&['\r', '\n'][..]);

        let field = record
            .split(self.delimiter.as_str())
            .nth(self.column)
            .ok_or_else(|| FilterError::MalformedRecord {
                line: self.line_number,
                reason: RecordFault::MissingColumn {
                    expected: self.column + 1,
                    found: record.split(self.delimiter.as_str()).count(),
                },
            })?;

        // Non-finite values would poison the cumulative mean for the rest of the run.
        match field.trim().parse::<f64>() {
            Ok(sample) if sample.is_finite() => Ok(sample),
            _ => Err(FilterError::MalformedRecord {
                line: self.line_number,
                reason: RecordFault::NotNumeric {
                    field: field.to_string(),
                },
            }),
        }
    }
}

impl<R: BufRead> Iterator for SampleSource<R> {
    type Item = Result<f64, FilterError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        self.line.clear();
        let result = match self.reader.read_until(b'\n', &mut self.line) {
            Ok(0) => {
                self.finished = true;
                return None;
            }
            Ok(_) => {
                self.line_number += 1;
                self.parse_line()
            }
            Err(e) => Err(e.into()),
        };

        if result.is_err() {
            self.finished = true;
        }
        Some(result)
    }
}
