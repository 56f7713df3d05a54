//! PDF text extraction with a text-layer-first, OCR-second fallback ladder.

use std::io::Write;

use lopdf::Document;
use tracing::warn;

use crate::error::ExtractionError;
use crate::extraction::ocr::OcrBackend;
use crate::extraction::{collapse_whitespace, normalize_blank_lines};
use crate::progress::ProgressSink;

pub const MAX_PDF_BYTES: usize = 50 * 1024 * 1024;

/// Per-page text below this length is treated as noise and dropped.
const PAGE_TEXT_MIN_CHARS: usize = 10;
/// Total text-layer length above which OCR is skipped entirely.
const TEXT_LAYER_SUFFICIENT_CHARS: usize = 100;
/// Combined result below this floor counts as "no meaningful text".
const COMBINED_MIN_CHARS: usize = 50;
/// OCR never runs past this many pages.
const OCR_MAX_PAGES: usize = 10;
/// Fixed rasterization zoom for OCR (1.5x of 72 DPI).
const OCR_ZOOM: f32 = 1.5;

/// Extract text from a PDF payload.
///
/// Pass 1 pulls the embedded text layer page by page. If any selectable text
/// was found and its total length exceeds 100 characters, OCR never runs.
/// Otherwise the first 10 pages are rasterized and recognized through the OCR
/// backend, and the combined result must still clear a 50-character floor.
pub fn extract(
    bytes: &[u8],
    ocr: &dyn OcrBackend,
    progress: &mut dyn ProgressSink,
) -> Result<String, ExtractionError> {
    progress.on_progress(5, "Validating PDF file...");
    if bytes.len() > MAX_PDF_BYTES {
        return Err(ExtractionError::FileTooLarge {
            kind: "PDF",
            limit_mb: 50,
        });
    }

    progress.on_progress(10, "Loading PDF document...");
    let doc = Document::load_mem(bytes).map_err(|e| {
        ExtractionError::InvalidDocument(format!(
            "the file may be corrupted or password-protected ({e})"
        ))
    })?;
    if doc.is_encrypted() {
        return Err(ExtractionError::InvalidDocument(
            "the document is password-protected".into(),
        ));
    }

    let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
    let page_count = page_numbers.len();
    if page_count == 0 {
        return Err(ExtractionError::NoReadableText(
            "the document contains no pages".into(),
        ));
    }
    progress.on_progress(10, &format!("Processing {page_count} pages..."));

    // Pass 1: embedded text layer.
    let mut page_texts: Vec<String> = Vec::new();
    let mut has_selectable_text = false;
    let mut total_text_chars = 0usize;

    for (index, page_no) in page_numbers.iter().enumerate() {
        match doc.extract_text(&[*page_no]) {
            Ok(raw) => {
                let text = collapse_whitespace(&raw);
                let chars = text.chars().count();
                if chars > PAGE_TEXT_MIN_CHARS {
                    has_selectable_text = true;
                    total_text_chars += chars;
                    page_texts.push(text);
                }
            }
            Err(e) => {
                warn!(page = page_no, error = %e, "skipping unreadable PDF page");
            }
        }
        let percent = 10 + ((index + 1) * 40 / page_count) as u8;
        progress.on_progress(
            percent,
            &format!("Extracting text from page {}...", index + 1),
        );
    }

    let text_layer = page_texts.join("\n\n");
    if has_selectable_text && total_text_chars > TEXT_LAYER_SUFFICIENT_CHARS {
        progress.on_progress(100, "Text extraction completed successfully!");
        return Ok(normalize_blank_lines(&text_layer));
    }

    // Fallback: rasterize and recognize the first pages.
    progress.on_progress(55, "No selectable text found. Initializing OCR...");
    let mut session = ocr.init()?;

    let mut scratch = tempfile::NamedTempFile::new()?;
    scratch.write_all(bytes)?;

    let ocr_page_count = page_count.min(OCR_MAX_PAGES);
    let mut ocr_texts: Vec<String> = Vec::new();
    for index in 0..ocr_page_count {
        let page_no = (index + 1) as u32;
        let percent = 60 + ((index + 1) * 35 / ocr_page_count) as u8;
        progress.on_progress(percent, &format!("Processing page {page_no} with OCR..."));

        let recognized = session.recognize_page(scratch.path(), page_no, OCR_ZOOM)?;
        let trimmed = recognized.trim();
        if trimmed.chars().count() > PAGE_TEXT_MIN_CHARS {
            ocr_texts.push(trimmed.to_string());
        }
    }

    let mut combined = text_layer;
    if !ocr_texts.is_empty() {
        if !combined.is_empty() {
            combined.push_str("\n\n");
        }
        combined.push_str(&ocr_texts.join("\n\n"));
    }

    if combined.trim().chars().count() < COMBINED_MIN_CHARS {
        return Err(ExtractionError::NoReadableText(
            "unable to extract meaningful text from this PDF. The document may contain \
             only images, be encrypted, or be corrupted."
                .into(),
        ));
    }

    progress.on_progress(100, "PDF processing completed successfully!");
    Ok(normalize_blank_lines(combined.trim()))
}
