pub mod docx;
pub mod ocr;
pub mod pdf;
pub mod pptx;

use crate::error::ExtractionError;
use crate::model::FileKind;
use crate::progress::ProgressSink;
use ocr::OcrBackend;

/// Extract plain text from a file payload, dispatching on the detected kind.
///
/// TXT/MD payloads bypass structured extraction entirely: their bytes are
/// decoded directly as text.
pub fn extract_text(
    bytes: &[u8],
    kind: FileKind,
    ocr: &dyn OcrBackend,
    progress: &mut dyn ProgressSink,
) -> Result<String, ExtractionError> {
    match kind {
        FileKind::Pdf => pdf::extract(bytes, ocr, progress),
        FileKind::Docx => docx::extract(bytes, progress),
        FileKind::Pptx => pptx::extract(bytes, progress),
        FileKind::Txt => {
            let text = String::from_utf8_lossy(bytes).into_owned();
            progress.on_progress(100, "Text file loaded.");
            Ok(text)
        }
    }
}

/// Collapse all whitespace runs to single spaces and trim.
pub(crate) fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize line endings and collapse runs of blank lines to a single one.
pub(crate) fn normalize_blank_lines(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_blank = false;
    let mut wrote_any = false;

    for line in s.replace("\r\n", "\n").lines() {
        let line = line.trim_end();
        if line.trim().is_empty() {
            pending_blank = wrote_any;
            continue;
        }
        if wrote_any {
            out.push('\n');
            if pending_blank {
                out.push('\n');
            }
        }
        out.push_str(line);
        wrote_any = true;
        pending_blank = false;
    }

    out
}
