//! Cooperative stop requests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag asking a running pipeline to stop at its next checkpoint.
///
/// Clones share the same flag, so one clone can live in a signal
/// handler while another is polled by the pipeline.
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    requested: Arc<AtomicBool>,
}

impl Interrupt {
    /// Creates a flag with no stop requested.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a stop. Returns true if one had already been requested.
    pub fn request(&self) -> bool {
        self.requested.swap(true, Ordering::SeqCst)
    }

    /// Returns true once a stop has been requested.
    #[inline]
    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }
}
