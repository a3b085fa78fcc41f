//! Process-wide shutdown coordination.
//! The ctrlc handler sets the flag; tree walks poll it between files so a
//! file is never left half-written by an interrupt.
//!
//! Relaxed atomics are sufficient for a one-way "stop" flag.
use std::sync::atomic::{AtomicBool, Ordering};

static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Request a cooperative shutdown (idempotent).
#[inline]
pub fn request() {
    SHUTDOWN.store(true, Ordering::Relaxed);
}

/// Check whether a shutdown has been requested.
#[inline]
pub fn is_requested() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}
