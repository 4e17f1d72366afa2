//! Output encodings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Textual or binary representation of each output byte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Two uppercase hex digits per byte, no separator.
    #[default]
    Hex,
    /// Decimal value of each byte, one per line.
    Decimal,
    /// Eight `0`/`1` characters per byte, most significant bit first.
    Binary,
    /// Standard base64, padded at end of stream.
    Base64,
    /// The byte itself.
    Raw,
}

impl OutputFormat {
    /// All supported formats.
    pub const ALL: [OutputFormat; 5] = [
        OutputFormat::Hex,
        OutputFormat::Decimal,
        OutputFormat::Binary,
        OutputFormat::Base64,
        OutputFormat::Raw,
    ];

    /// Returns the lowercase name used on the command line and in config files.
    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Hex => "hex",
            OutputFormat::Decimal => "decimal",
            OutputFormat::Binary => "binary",
            OutputFormat::Base64 => "base64",
            OutputFormat::Raw => "raw",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
