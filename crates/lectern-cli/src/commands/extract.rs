use std::path::PathBuf;

use lectern_core::extraction::ocr::TesseractBackend;
use lectern_core::{ExtractionError, FileKind};

use crate::commands::progress_sink;

pub fn run(
    input_file: PathBuf,
    mime: Option<&str>,
    out: Option<PathBuf>,
    progress: bool,
) -> Result<(), ExtractionError> {
    let filename = input_file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let kind = FileKind::detect(mime, &filename)?;

    let bytes = std::fs::read(&input_file)?;
    let ocr = TesseractBackend::new();
    let mut sink = progress_sink(progress);

    let text = lectern_core::extract_text(&bytes, kind, &ocr, sink.as_mut())?;

    match out {
        Some(path) => {
            std::fs::write(&path, &text)?;
            eprintln!(
                "Extracted {} characters from {kind} file, written to {}",
                text.chars().count(),
                path.display()
            );
        }
        None => println!("{text}"),
    }

    Ok(())
}
