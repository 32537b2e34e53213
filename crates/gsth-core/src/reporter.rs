//! Reporter trait for dependency injection
//!
//! Operations describe their progress through this trait so the core stays
//! free of terminal concerns. The CLI prints; tests record or discard.

/// Progress sink for the theme operations.
pub trait Reporter: Send + Sync {
    /// A top-level phase ("Reading gresource compiled content ...").
    fn section(&self, title: &str);

    /// A sub-step of the current phase ("Copying gresource file ...").
    fn step(&self, msg: &str);

    /// Per-entry progress inside a loop ("Extracting gdm.css ...").
    fn item(&self, msg: &str);

    /// A continuation line for the previous message, usually a path.
    fn detail(&self, msg: &str);

    /// The operation finished.
    fn success(&self, msg: &str);

    /// Something was skipped or looks wrong, but the operation continues.
    fn warning(&self, msg: &str);
}

/// A no-op reporter for silent operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn section(&self, _: &str) {}
    fn step(&self, _: &str) {}
    fn item(&self, _: &str) {}
    fn detail(&self, _: &str) {}
    fn success(&self, _: &str) {}
    fn warning(&self, _: &str) {}
}
