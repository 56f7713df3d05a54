use std::path::PathBuf;

use lectern_core::extraction::ocr::TesseractBackend;
use lectern_core::{ExtractionError, FileKind, NoteFormat, NotesPipeline, Transcript};

use crate::commands::progress_sink;

pub fn run(
    input_file: PathBuf,
    format: NoteFormat,
    title: Option<String>,
    output_format: &str,
    progress: bool,
) -> Result<(), ExtractionError> {
    let filename = input_file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let kind = FileKind::detect(None, &filename)?;

    let bytes = std::fs::read(&input_file)?;
    let ocr = TesseractBackend::new();
    let mut sink = progress_sink(progress);

    let content = lectern_core::extract_text(&bytes, kind, &ocr, sink.as_mut())?;

    let title = title.unwrap_or_else(|| {
        input_file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Untitled transcript".into())
    });
    let transcript = Transcript::new(title, content);
    let notes = NotesPipeline::new().generate_notes(&transcript, format, sink.as_mut());

    match output_format {
        "json" => {
            let json = serde_json::to_string_pretty(&notes)?;
            println!("{json}");
        }
        _ => {
            println!("{}", notes.content);
            if !notes.keywords.is_empty() {
                println!("\nKeywords: {}", notes.keywords.join(", "));
            }
            println!("\nSummary: {}", notes.summary);
        }
    }

    Ok(())
}
