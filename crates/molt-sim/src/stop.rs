//! Cooperative cancellation of a running frame loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared stop flag.
///
/// Clones share the flag, so a handle can be given to a signal handler, an
/// observer, or another thread while the loop runs.  The loop checks it
/// before each frame; a frame already in progress always completes.
#[derive(Clone, Debug, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that no further frames run.
    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Clear a previous stop so the simulation can be resumed.
    pub fn reset(&self) {
        self.0.store(false, Ordering::Release);
    }
}
