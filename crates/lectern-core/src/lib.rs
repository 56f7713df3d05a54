pub mod error;
pub mod extraction;
pub mod model;
pub mod notes;
pub mod pipeline;
pub mod progress;

pub use error::ExtractionError;
pub use model::{FileKind, GeneratedNotes, NoteFormat, ProcessingStatus, Stage, Transcript};
pub use pipeline::NotesPipeline;
pub use progress::{FnProgress, NoProgress, ProgressSink};

use extraction::ocr::OcrBackend;

/// Main API entry point: extract plain text from a file payload.
///
/// Dispatches on the file kind; PDF extraction may fall back to the provided
/// OCR backend when no usable embedded text layer exists. Progress updates
/// arrive in a strictly ordered, non-decreasing sequence ending at 100.
pub fn extract_text(
    bytes: &[u8],
    kind: FileKind,
    ocr: &dyn OcrBackend,
    progress: &mut dyn ProgressSink,
) -> Result<String, ExtractionError> {
    extraction::extract_text(bytes, kind, ocr, progress)
}

/// Main API entry point: generate structured notes for a transcript.
///
/// Runs the fixed five-stage progress sequence (without pacing), then the
/// note generator. Never fails for well-formed input.
pub fn generate_notes(
    transcript: &Transcript,
    format: NoteFormat,
    progress: &mut dyn ProgressSink,
) -> GeneratedNotes {
    NotesPipeline::new().generate_notes(transcript, format, progress)
}
