//! DOCX text extraction via structural WordprocessingML parsing.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::error::ExtractionError;
use crate::extraction::normalize_blank_lines;
use crate::progress::ProgressSink;

pub const MAX_DOCX_BYTES: usize = 100 * 1024 * 1024;

const MIN_TEXT_CHARS: usize = 10;

/// Compound File Binary signature: a legacy `.doc`, not a zip-based `.docx`.
const OLE2_MAGIC: [u8; 4] = [0xD0, 0xCF, 0x11, 0xE0];

/// Extract paragraph text from a DOCX payload.
pub fn extract(bytes: &[u8], progress: &mut dyn ProgressSink) -> Result<String, ExtractionError> {
    progress.on_progress(10, "Reading DOCX file...");
    if bytes.len() > MAX_DOCX_BYTES {
        return Err(ExtractionError::FileTooLarge {
            kind: "DOCX",
            limit_mb: 100,
        });
    }
    if bytes.starts_with(&OLE2_MAGIC) {
        return Err(ExtractionError::UnsupportedLegacyFormat);
    }

    progress.on_progress(30, "Processing document structure...");
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(|e| {
        ExtractionError::InvalidDocument(format!("not a valid DOCX archive: {e}"))
    })?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| {
            ExtractionError::InvalidDocument(format!("missing word/document.xml: {e}"))
        })?
        .read_to_string(&mut xml)
        .map_err(|e| ExtractionError::InvalidDocument(format!("unreadable document body: {e}")))?;

    progress.on_progress(60, "Extracting text content...");
    let raw = paragraph_text(&xml)?;

    progress.on_progress(90, "Cleaning up text...");
    let text = normalize_blank_lines(&raw);
    if text.chars().count() < MIN_TEXT_CHARS {
        return Err(ExtractionError::NoReadableText(
            "no readable text found in the document. The file may be empty or corrupted.".into(),
        ));
    }

    progress.on_progress(100, "DOCX processing completed successfully!");
    Ok(text)
}

/// Walk the WordprocessingML body, collecting `w:t` runs and inserting
/// breaks at paragraph ends.
fn paragraph_text(xml: &str) -> Result<String, ExtractionError> {
    let mut reader = Reader::from_reader(xml.as_bytes());
    let mut out = String::new();
    let mut in_text_run = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"t" => in_text_run = true,
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text_run = false,
                b"p" => out.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"br" => out.push('\n'),
                b"tab" => out.push(' '),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text_run => {
                let text = t.unescape().map_err(|e| {
                    ExtractionError::InvalidDocument(format!("malformed document XML: {e}"))
                })?;
                out.push_str(&text);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(ExtractionError::InvalidDocument(format!(
                    "malformed document XML: {e}"
                )))
            }
        }
        buf.clear();
    }

    Ok(out)
}
