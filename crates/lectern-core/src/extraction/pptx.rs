//! PPTX text extraction: slide XML parts are located inside the zip archive
//! and their text runs pulled out with the `<a:t>` run pattern.

use std::io::{Cursor, Read};
use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;
use zip::ZipArchive;

use crate::error::ExtractionError;
use crate::extraction::normalize_blank_lines;
use crate::progress::ProgressSink;

pub const MAX_PPTX_BYTES: usize = 100 * 1024 * 1024;

const MIN_TEXT_CHARS: usize = 10;

static SLIDE_PART: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ppt/slides/slide(\d+)\.xml$").unwrap());
static TEXT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<a:t[^>]*>([^<]*)</a:t>").unwrap());
static RESIDUAL_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Extract text from a PPTX payload, one `--- Slide N ---` section per slide
/// that contains at least one text run. `N` counts contributing slides, not
/// the underlying file index.
pub fn extract(bytes: &[u8], progress: &mut dyn ProgressSink) -> Result<String, ExtractionError> {
    progress.on_progress(10, "Reading PPTX file...");
    if bytes.len() > MAX_PPTX_BYTES {
        return Err(ExtractionError::FileTooLarge {
            kind: "PPTX",
            limit_mb: 100,
        });
    }

    progress.on_progress(30, "Processing presentation structure...");
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(|e| {
        ExtractionError::InvalidDocument(format!(
            "the file appears to be corrupted or is not a valid PowerPoint file: {e}"
        ))
    })?;

    progress.on_progress(50, "Extracting slide content...");
    // Collect slide parts in slide-number order; zip entry order is arbitrary.
    let mut slide_parts: Vec<(u32, String)> = Vec::new();
    for name in archive.file_names() {
        if let Some(caps) = SLIDE_PART.captures(name) {
            if let Ok(index) = caps[1].parse::<u32>() {
                slide_parts.push((index, name.to_string()));
            }
        }
    }
    slide_parts.sort_by_key(|(index, _)| *index);

    progress.on_progress(70, "Parsing slide text...");
    let mut out = String::new();
    let mut slide_count = 0usize;

    for (index, name) in &slide_parts {
        let mut xml = String::new();
        let read = archive
            .by_name(name)
            .map_err(|e| e.to_string())
            .and_then(|mut f| f.read_to_string(&mut xml).map_err(|e| e.to_string()));
        if let Err(reason) = read {
            warn!(slide = index, %reason, "skipping unreadable slide part");
            continue;
        }

        let runs: Vec<String> = TEXT_RUN
            .captures_iter(&xml)
            .map(|caps| {
                let run = RESIDUAL_TAG.replace_all(caps.get(0).map_or("", |m| m.as_str()), "");
                decode_xml_entities(run.trim())
            })
            .filter(|text| !text.is_empty())
            .collect();
        if runs.is_empty() {
            continue;
        }

        slide_count += 1;
        out.push_str(&format!("\n\n--- Slide {slide_count} ---\n\n"));
        for run in runs {
            out.push_str(&run);
            out.push('\n');
        }
    }

    progress.on_progress(90, "Cleaning up text...");
    let text = normalize_blank_lines(&out);
    if text.chars().count() < MIN_TEXT_CHARS {
        return Err(ExtractionError::NoReadableText(
            "no readable text found in the presentation. The file may be empty, corrupted, \
             or contain only images."
                .into(),
        ));
    }

    progress.on_progress(100, "PPTX processing completed successfully!");
    Ok(text)
}

fn decode_xml_entities(s: &str) -> String {
    s.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
}
