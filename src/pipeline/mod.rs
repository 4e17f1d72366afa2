//! End-to-end runs of the two commands.
//!
//! ```text
//! raw frames ──Detect──▶ CSV records ──Filter──▶ hex / decimal / binary / base64 / raw
//! ```
//!
//! Both pipelines are single-threaded and single-pass. They own their
//! input and output for the duration of a run and stop cooperatively
//! when an [`Interrupt`] is requested.

mod detect;
mod filter;
mod interrupt;

pub use detect::{Detect, DetectReport};
pub use filter::{Filter, FilterReport};
pub use interrupt::Interrupt;
