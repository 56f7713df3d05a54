pub mod analysis;
pub mod keywords;
pub mod render;

use chrono::Utc;

use crate::model::{GeneratedNotes, NoteFormat, Transcript};

/// Generate structured notes for one transcript and format.
///
/// Keywords and summary derive from the content alone, so they are identical
/// across formats; only `content` varies with the requested format. Pure
/// string transforms: this never fails for well-formed input.
pub fn generate(transcript: &Transcript, format: NoteFormat) -> GeneratedNotes {
    let keywords = keywords::extract_keywords(&transcript.content);
    let summary = analysis::extractive_summary(&transcript.content);
    let content = render::render(format, &transcript.title, &transcript.content);

    let now = Utc::now();
    GeneratedNotes {
        id: now.timestamp_millis().to_string(),
        transcript_id: transcript.id.clone(),
        format,
        content,
        created_at: now,
        keywords,
        summary,
    }
}
