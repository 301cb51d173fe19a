// src/progress.rs
/// Lightweight progress reporting for the ingestion pass.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of markers (0 if unknown).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One marker was folded into the pass.
    fn item_done(&mut self, _id: &str) {}

    /// One marker was skipped.
    fn item_failed(&mut self, _id: &str, _reason: &str) {}

    /// Called at the end of the pass.
    fn finish(&mut self) {}
}
