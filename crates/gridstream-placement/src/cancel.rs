//! Cooperative cancellation flag.
//!
//! The engine is synchronous and imposes no timeout of its own; a caller
//! that wants a wall-clock limit flips the token from another thread. The
//! assignment run consults it between rebalance passes and between hosts
//! during endpoint expansion, and fails with `Cancelled` once it observes
//! the flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cheaply clonable cancellation flag shared between a caller and one
/// assignment run.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
