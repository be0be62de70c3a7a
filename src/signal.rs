//! Excitement flag shared with interrupt handlers
//!
//! The only state crossing execution contexts is a single boolean, so a
//! relaxed atomic is enough. Place the signal in a `static`, set it from the
//! input handler and let the render loop call
//! [`PatternEngine::follow`](crate::PatternEngine::follow) before each
//! `advance`.

use core::sync::atomic::{AtomicBool, Ordering};

/// Atomic excitement flag
#[derive(Debug, Default)]
pub struct ExcitementSignal {
    excited: AtomicBool,
}

impl ExcitementSignal {
    /// Create a new, not excited, signal
    pub const fn new() -> Self {
        Self {
            excited: AtomicBool::new(false),
        }
    }

    /// Set the flag. Safe to call from an interrupt.
    pub fn set(&self, excited: bool) {
        self.excited.store(excited, Ordering::Relaxed);
    }

    /// Read the flag
    pub fn is_set(&self) -> bool {
        self.excited.load(Ordering::Relaxed)
    }
}
