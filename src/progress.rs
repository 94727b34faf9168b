//! Progress reporting seam for the batch orchestrator.
//!
//! Rendering is a capability the orchestrator consumes, not something it
//! does: workers call [`ProgressReporter::tick`] exactly once per file and
//! the implementation decides what (if anything) to draw. The console
//! reporter writes a carriage-return ticker to stderr so it never mixes
//! with flushed diagnostics on stdout.

use std::io::Write;

/// One tick per completed unit of work, success or failure alike.
pub trait ProgressReporter: Sync {
    /// A batch of `total` files is starting.
    fn begin(&self, total: usize);

    /// `completed` of `total` files have finished.
    fn tick(&self, completed: usize, total: usize);

    /// The batch is done; release the display line.
    fn finish(&self);
}

/// Minimal `completed/total` ticker on stderr.
pub struct ConsoleProgress;

impl ConsoleProgress {
    pub fn new() -> Self {
        Self
    }

    fn draw(&self, completed: usize, total: usize) {
        let mut err = std::io::stderr();
        let _ = write!(err, "\r{completed}/{total}");
        let _ = err.flush();
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for ConsoleProgress {
    fn begin(&self, total: usize) {
        self.draw(0, total);
    }

    fn tick(&self, completed: usize, total: usize) {
        self.draw(completed, total);
    }

    fn finish(&self) {
        eprintln!();
    }
}

/// Reporter that draws nothing. Used by tests and library callers that
/// aggregate the [`BatchReport`](crate::batch::BatchReport) instead.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn begin(&self, _total: usize) {}
    fn tick(&self, _completed: usize, _total: usize) {}
    fn finish(&self) {}
}
