//! Errors raised by the debiasing filter.

use thiserror::Error;

/// Why an input record could not be turned into a sample.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordFault {
    /// The record has too few fields for the configured column.
    #[error("expected at least {expected} fields, found {found}")]
    MissingColumn {
        /// Fields needed to reach the column.
        expected: usize,
        /// Fields present.
        found: usize,
    },

    /// The selected field is not a finite number.
    #[error("field {field:?} is not a number")]
    NotNumeric {
        /// The field as read, after UTF-8 replacement.
        field: String,
    },
}

/// Errors that can occur while filtering samples into bytes.
#[derive(Debug, Error)]
pub enum FilterError {
    /// An input line failed to split or parse at the configured column.
    /// Fatal: the run is aborted rather than skipping the record.
    #[error("malformed record on line {line}: {reason}")]
    MalformedRecord {
        /// 1-based line number.
        line: u64,
        /// What was wrong with the line.
        reason: RecordFault,
    },

    /// The running estimate was queried before any sample was observed.
    #[error("running estimate queried before any sample was observed")]
    EstimatorNotReady,

    /// Reading input or writing output failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
