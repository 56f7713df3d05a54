//! Pipeline orchestrator: staged progress reporting around note generation.

use std::time::Duration;

use crate::model::{GeneratedNotes, NoteFormat, ProcessingStatus, Stage, Transcript};
use crate::notes;
use crate::progress::ProgressSink;

/// The five fixed stages of one generation call, in emission order.
fn stages() -> [ProcessingStatus; 5] {
    [
        status(Stage::Analyzing, 20, "Analyzing transcript content..."),
        status(Stage::Extracting, 45, "Extracting key information..."),
        status(Stage::Structuring, 70, "Structuring notes..."),
        status(Stage::Finalizing, 90, "Finalizing output..."),
        status(Stage::Complete, 100, "Notes generated successfully!"),
    ]
}

fn status(stage: Stage, progress: u8, message: &str) -> ProcessingStatus {
    ProcessingStatus {
        stage,
        progress,
        message: message.into(),
    }
}

/// Sequences staged progress reporting and invokes the note generator.
///
/// Synchronous and single-threaded: callbacks fire in stage order, strictly
/// increasing, within the caller's thread. There is no cancellation; a caller
/// that has abandoned the operation should ignore the final callback.
pub struct NotesPipeline {
    /// Pause between stages. The interactive original paced stages by
    /// 800-1200 ms purely for perceived progress; zero changes nothing about
    /// correctness.
    pacing: Duration,
}

impl NotesPipeline {
    pub fn new() -> NotesPipeline {
        NotesPipeline {
            pacing: Duration::ZERO,
        }
    }

    pub fn with_pacing(pacing: Duration) -> NotesPipeline {
        NotesPipeline { pacing }
    }

    pub fn generate_notes(
        &self,
        transcript: &Transcript,
        format: NoteFormat,
        progress: &mut dyn ProgressSink,
    ) -> GeneratedNotes {
        for stage in stages() {
            progress.on_progress(stage.progress, &stage.message);
            if !self.pacing.is_zero() {
                std::thread::sleep(self.pacing);
            }
        }
        notes::generate(transcript, format)
    }
}

impl Default for NotesPipeline {
    fn default() -> Self {
        Self::new()
    }
}
