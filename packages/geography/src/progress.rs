//! Progress reporting trait for the resolver scan.
//!
//! Decouples progress reporting from any specific rendering backend; the
//! CLI provides an `indicatif` implementation, tests and library callers
//! use [`NullProgress`].

/// Trait for reporting progress from long-running operations.
pub trait ProgressCallback {
    /// Set the total expected units of work (enables percentage/ETA).
    fn set_total(&self, total: u64);

    /// Advance progress by `delta` units.
    fn inc(&self, delta: u64);

    /// Mark progress as complete with a final message.
    fn finish(&self, msg: String);
}

/// A no-op implementation of [`ProgressCallback`] that silently ignores
/// all progress updates.
pub struct NullProgress;

impl ProgressCallback for NullProgress {
    fn set_total(&self, _total: u64) {}
    fn inc(&self, _delta: u64) {}
    fn finish(&self, _msg: String) {}
}
