//! One-shot marker for the first observed ping request.

use std::sync::atomic::{AtomicBool, Ordering};

/// Atomic set-once gate.
///
/// Handlers run concurrently, so any number of callers may race for the
/// marker; exactly one ever wins [`claim`](Self::claim). The winner's
/// response carries the diagnostic `X-First-Request` header.
#[derive(Debug, Default)]
pub struct FirstRequestGate {
    fired: AtomicBool,
}

impl FirstRequestGate {
    /// A gate that has not fired yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true for the single first caller, false forever after.
    pub fn claim(&self) -> bool {
        !self.fired.swap(true, Ordering::SeqCst)
    }
}
