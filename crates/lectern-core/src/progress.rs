/// Observer for extraction and generation progress.
///
/// Callbacks fire synchronously between pipeline steps, so implementors see a
/// strictly ordered, monotonically non-decreasing sequence of updates within
/// one call.
pub trait ProgressSink {
    fn on_progress(&mut self, percent: u8, message: &str);
}

/// Adapter turning any `FnMut(percent, message)` closure into a sink.
pub struct FnProgress<F: FnMut(u8, &str)>(pub F);

impl<F: FnMut(u8, &str)> ProgressSink for FnProgress<F> {
    fn on_progress(&mut self, percent: u8, message: &str) {
        (self.0)(percent, message);
    }
}

/// The absent-observer case: discards all updates.
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_progress(&mut self, _percent: u8, _message: &str) {}
}
