//! The `filter` pipeline: CSV samples in, formatted random bytes out.

use super::Interrupt;
use crate::analysis::{QualityThresholds, StatisticalTests, StatisticsAccumulator};
use crate::config::FilterConfig;
use crate::error::FilterError;
use crate::extraction::{warm_up, BitExtractor, BytePacker, SampleBudget, SampleSource};
use crate::output::FormattedWriter;
use std::io::{BufRead, Write};
use tracing::{debug, info, trace, warn};

/// Summary of a completed filter run.
#[derive(Debug, Clone)]
pub struct FilterReport {
    /// Samples read before the first bit was committed.
    pub warmup_samples: u64,
    /// Samples turned into bits, replayed and live.
    pub samples_consumed: u64,
    /// Bytes written to the output.
    pub bytes_written: u64,
    /// Final value of the running estimate, if any sample was read.
    pub final_mean: Option<f64>,
    /// True if the run stopped on request before the input ran out.
    pub interrupted: bool,
    /// Statistics over the written bytes.
    pub statistics: StatisticalTests,
}

/// Debiasing filter over a stream of CSV records.
///
/// Each run is a single pass: the first `min_samples` samples seed the
/// cumulative mean and are then replayed, each sample becomes one bit
/// and every eight bits one output byte.
pub struct Filter {
    config: FilterConfig,
    thresholds: QualityThresholds,
}

impl Filter {
    /// Creates a filter with default quality thresholds.
    pub fn new(config: FilterConfig) -> Self {
        Self::with_thresholds(config, QualityThresholds::default())
    }

    /// Creates a filter with custom quality thresholds.
    pub fn with_thresholds(config: FilterConfig, thresholds: QualityThresholds) -> Self {
        Self { config, thresholds }
    }

    /// Returns the filter configuration.
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Runs the filter until the input is exhausted or the length cap is hit.
    pub fn run<R, W>(&self, input: R, output: W) -> Result<FilterReport, FilterError>
    where
        R: BufRead,
        W: Write,
    {
        self.run_until(input, output, &Interrupt::new())
    }

    /// Runs the filter, also stopping before the next byte once
    /// `interrupt` is requested.
    ///
    /// Bits of an unfinished byte are dropped; everything already
    /// packed is written and flushed.
    pub fn run_until<R, W>(
        &self,
        input: R,
        output: W,
        interrupt: &Interrupt,
    ) -> Result<FilterReport, FilterError>
    where
        R: BufRead,
        W: Write,
    {
        let budget = SampleBudget::from_length(self.config.length);
        let source = SampleSource::new(input, self.config.column, self.config.delimiter.as_str());

        let (samples, estimate) = warm_up(source, self.config.min_samples, budget)?;
        let warmup_samples = estimate.count();
        debug!(
            samples = warmup_samples,
            mean = estimate.current().ok(),
            "Warm-up complete"
        );

        let mut bytes = BytePacker::new(BitExtractor::new(samples, estimate));
        let mut writer = FormattedWriter::new(output, self.config.format, self.config.buffer_size);
        let mut statistics = StatisticsAccumulator::new();
        let mut interrupted = false;

        loop {
            if interrupt.is_requested() {
                interrupted = true;
                info!(written = writer.written(), "Stop requested, finishing output");
                break;
            }

            let Some(byte) = bytes.next() else {
                break;
            };
            let byte = byte?;

            writer.write_byte(byte)?;
            statistics.push(byte);
            trace!(byte, "Wrote byte");
        }

        let bytes_written = writer.written();
        writer.finish()?;

        let extractor = bytes.into_inner();
        let report = FilterReport {
            warmup_samples,
            samples_consumed: extractor.bits_emitted(),
            bytes_written,
            final_mean: extractor.estimate().current().ok(),
            interrupted,
            statistics: statistics.summary(),
        };

        if let Err(violation) = self.thresholds.check(&report.statistics) {
            warn!(violation = %violation, "Output quality check failed");
        }

        info!(
            format = %self.config.format,
            samples = report.samples_consumed,
            bytes = report.bytes_written,
            bias = report.statistics.bit_bias,
            "Filter finished"
        );

        Ok(report)
    }
}
