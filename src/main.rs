//! Radioactive Decay RNG CLI
//!
//! `detect` turns a raw video stream into CSV decay records;
//! `filter` turns those records into random bytes.
//!
//! ```text
//! camera-dump | decay-rng detect | decay-rng filter --column 1 --format base64
//! ```

use clap::{Args, Parser, Subcommand};
use decay_rng::{
    capture::{CaptureError, DetectorConfig},
    config::{ConfigError, FileConfig, FilterConfig},
    output::OutputFormat,
    Detect, Filter, FilterError, Interrupt,
};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;
use tracing::{info, warn};

/// Exit status used when a second Ctrl-C forces termination.
const FORCED_EXIT: i32 = 130;

#[derive(Debug, Parser)]
#[command(name = "decay-rng", version, about = "Random numbers from radioactive decay")]
struct Cli {
    /// TOML configuration file; command-line options take precedence
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Filter CSV decay records into a stream of random bytes
    Filter(FilterArgs),
    /// Detect decay flashes in raw 8-bit grayscale video frames
    Detect(DetectArgs),
}

#[derive(Debug, Args)]
struct FilterArgs {
    /// Where to read CSV records from. Defaults to stdin
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Where to write the output (truncated). Defaults to stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Format of the output data [default: hex]
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
    /// Number of bytes to extract before quitting; 0 for no limit
    #[arg(long)]
    length: Option<u64>,
    /// Zero-based column number in the input CSV [default: 0]
    #[arg(long)]
    column: Option<usize>,
    /// Column delimiter in the input [default: ","]
    #[arg(long)]
    delimiter: Option<String>,
    /// Number of samples to average before the first bit [default: 100]
    #[arg(long)]
    min_samples: Option<usize>,
    /// Forces an output flush after this many bytes; 0 to disable [default: 64]
    #[arg(long)]
    buffer_size: Option<usize>,
}

impl FilterArgs {
    fn apply(&self, mut config: FilterConfig) -> Result<FilterConfig, ConfigError> {
        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(length) = self.length {
            config.length = length;
        }
        if let Some(column) = self.column {
            config.column = column;
        }
        if let Some(delimiter) = &self.delimiter {
            config.delimiter = delimiter.clone();
        }
        if let Some(min_samples) = self.min_samples {
            config.min_samples = min_samples;
        }
        if let Some(buffer_size) = self.buffer_size {
            config.buffer_size = buffer_size;
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Args)]
struct DetectArgs {
    /// Where to read raw frames from. Defaults to stdin
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Where to write CSV records (truncated). Defaults to stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Width of the video stream in pixels [default: 320]
    #[arg(long)]
    width: Option<u32>,
    /// Height of the video stream in pixels [default: 240]
    #[arg(long)]
    height: Option<u32>,
    /// Ignore this many rows at the top of each frame [default: 0]
    #[arg(long)]
    trim_top: Option<u32>,
    /// Ignore this many rows at the bottom of each frame [default: 0]
    #[arg(long)]
    trim_bottom: Option<u32>,
    /// Brightness a pixel must exceed to count as a decay [default: 50]
    #[arg(long)]
    threshold: Option<u8>,
}

impl DetectArgs {
    fn apply(&self, mut config: DetectorConfig) -> Result<DetectorConfig, ConfigError> {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(trim_top) = self.trim_top {
            config.trim_top = trim_top;
        }
        if let Some(trim_bottom) = self.trim_bottom {
            config.trim_bottom = trim_bottom;
        }
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Errors that end the program with a non-zero status.
#[derive(Debug, Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to open {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("failed to install signal handler: {0}")]
    Signal(#[from] ctrlc::Error),
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error(transparent)]
    Capture(#[from] CaptureError),
}

fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>, CliError> {
    match path {
        Some(path) => {
            let file = File::open(path).map_err(|source| CliError::Open {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>, CliError> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|source| CliError::Open {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let file_config = match &cli.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };

    // First Ctrl-C finishes the output cleanly, a second one exits at once
    let interrupt = Interrupt::new();
    let handler = interrupt.clone();
    ctrlc::set_handler(move || {
        if handler.request() {
            std::process::exit(FORCED_EXIT);
        }
    })?;

    match cli.command {
        Command::Filter(args) => {
            let filter = Filter::with_thresholds(args.apply(file_config.filter)?, file_config.quality);
            let config = filter.config();
            info!(
                format = %config.format,
                column = config.column,
                min_samples = config.min_samples,
                length = config.length,
                "Starting filter"
            );

            let input = open_input(args.input.as_deref())?;
            let output = open_output(args.output.as_deref())?;
            let report = filter.run_until(input, output, &interrupt)?;

            if report.interrupted {
                warn!(bytes = report.bytes_written, "Filter interrupted");
            }
        }
        Command::Detect(args) => {
            let config = args.apply(file_config.detect)?;
            info!(
                width = config.width,
                height = config.height,
                threshold = config.threshold,
                "Starting detector"
            );

            let input: Box<dyn Read> = match args.input.as_deref() {
                Some(path) => Box::new(File::open(path).map_err(|source| CliError::Open {
                    path: path.to_path_buf(),
                    source,
                })?),
                None => Box::new(io::stdin().lock()),
            };
            let output = open_output(args.output.as_deref())?;
            let report = Detect::new(config).run_until(input, output, &interrupt)?;

            if report.interrupted {
                warn!(frames = report.frames, "Detector interrupted");
            }
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    // Standard output carries data, so logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    info!("Decay RNG v{}", decay_rng::VERSION);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("decay-rng: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use decay_rng::capture::DetectorConfigError;

    const FILE: &str = r#"
        [filter]
        format = "binary"
        column = 2
        delimiter = ";"
        min_samples = 40

        [detect]
        width = 640
        height = 480
        threshold = 80
    "#;

    fn filter_config(args: &[&str]) -> Result<FilterConfig, ConfigError> {
        let file = FileConfig::from_toml(FILE).unwrap();
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Filter(args) => args.apply(file.filter),
            other => panic!("expected filter command, got {:?}", other),
        }
    }

    fn detect_config(args: &[&str]) -> Result<DetectorConfig, ConfigError> {
        let file = FileConfig::from_toml(FILE).unwrap();
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Detect(args) => args.apply(file.detect),
            other => panic!("expected detect command, got {:?}", other),
        }
    }

    #[test]
    fn test_flag_overrides_file() {
        let config = filter_config(&["decay-rng", "filter", "--format", "raw", "--column", "0"]).unwrap();

        assert_eq!(config.format, OutputFormat::Raw);
        assert_eq!(config.column, 0);
        // Untouched settings still come from the file
        assert_eq!(config.delimiter, ";");
        assert_eq!(config.min_samples, 40);
    }

    #[test]
    fn test_missing_flags_keep_file_values() {
        let config = filter_config(&["decay-rng", "filter"]).unwrap();

        assert_eq!(config.format, OutputFormat::Binary);
        assert_eq!(config.column, 2);
        assert_eq!(config.delimiter, ";");
        // Not in the file either, so the built-in default applies
        assert_eq!(config.buffer_size, FilterConfig::default().buffer_size);
    }

    #[test]
    fn test_empty_delimiter_rejected_after_merge() {
        let result = filter_config(&["decay-rng", "filter", "--delimiter", ""]);
        assert!(matches!(result, Err(ConfigError::EmptyDelimiter)));
    }

    #[test]
    fn test_detect_flags_override_file() {
        let config = detect_config(&["decay-rng", "detect", "--height", "240"]).unwrap();

        assert_eq!(config.width, 640);
        assert_eq!(config.height, 240);
        assert_eq!(config.threshold, 80);
    }

    #[test]
    fn test_detect_validated_after_merge() {
        let result = detect_config(&["decay-rng", "detect", "--height", "4", "--trim-top", "3", "--trim-bottom", "3"]);
        assert!(matches!(
            result,
            Err(ConfigError::Detector(DetectorConfigError::TrimExceedsHeight { trim: 6, height: 4 }))
        ));
    }

    #[test]
    fn test_global_config_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["decay-rng", "filter", "--config", "rng.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("rng.toml")));
    }
}
