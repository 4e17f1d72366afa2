//! Serialization of the output byte stream.

mod base64;
mod format;
mod writer;

pub use base64::Base64Encoder;
pub use format::OutputFormat;
pub use writer::{FormattedWriter, DEFAULT_BUFFER_SIZE};
