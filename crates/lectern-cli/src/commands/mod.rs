pub mod extract;
pub mod notes;

use lectern_core::{NoProgress, ProgressSink};

/// Progress sink that mirrors updates to stderr as `[ 45%] message` lines.
pub struct StderrProgress;

impl ProgressSink for StderrProgress {
    fn on_progress(&mut self, percent: u8, message: &str) {
        eprintln!("[{percent:>3}%] {message}");
    }
}

/// Select the progress sink for the `--progress` flag.
pub fn progress_sink(progress: bool) -> Box<dyn ProgressSink> {
    if progress {
        Box::new(StderrProgress)
    } else {
        Box::new(NoProgress)
    }
}
