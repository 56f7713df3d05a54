//! OCR fallback for scanned PDFs.
//!
//! Recognition runs through external `pdftoppm` (rasterization) and
//! `tesseract` (recognition) processes. Both are probed at session
//! initialization so a missing install surfaces as a single
//! `ExtractionError::OcrInit` instead of a mid-extraction failure.

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

use crate::error::ExtractionError;

/// Factory for OCR sessions. One session is acquired per PDF-extraction call
/// and never shared.
pub trait OcrBackend {
    fn init(&self) -> Result<Box<dyn OcrSession>, ExtractionError>;
}

/// One exclusively-owned recognition session.
///
/// Scratch resources are released when the session is dropped, on every exit
/// path including errors propagating mid-loop.
pub trait OcrSession {
    /// Rasterize one page of the PDF at the given zoom factor and recognize
    /// its text.
    fn recognize_page(
        &mut self,
        pdf: &Path,
        page: u32,
        zoom: f32,
    ) -> Result<String, ExtractionError>;
}

/// OCR backend driving the `pdftoppm` + `tesseract` binaries.
pub struct TesseractBackend {
    language: String,
}

impl TesseractBackend {
    pub fn new() -> TesseractBackend {
        TesseractBackend {
            language: "eng".into(),
        }
    }

    pub fn with_language(language: impl Into<String>) -> TesseractBackend {
        TesseractBackend {
            language: language.into(),
        }
    }

    /// Check whether both external tools are available on the system.
    pub fn is_available() -> bool {
        probe("tesseract", "--version") && probe("pdftoppm", "-v")
    }
}

impl Default for TesseractBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrBackend for TesseractBackend {
    fn init(&self) -> Result<Box<dyn OcrSession>, ExtractionError> {
        if !probe("tesseract", "--version") {
            return Err(ExtractionError::OcrInit(
                "tesseract not found. Install it with: brew install tesseract (macOS) \
                 or apt install tesseract-ocr (Linux)"
                    .into(),
            ));
        }
        if !probe("pdftoppm", "-v") {
            return Err(ExtractionError::OcrInit(
                "pdftoppm not found. Install poppler: brew install poppler (macOS) \
                 or apt install poppler-utils (Linux)"
                    .into(),
            ));
        }
        let scratch = TempDir::new()
            .map_err(|e| ExtractionError::OcrInit(format!("could not create scratch dir: {e}")))?;
        Ok(Box::new(TesseractSession {
            language: self.language.clone(),
            scratch,
        }))
    }
}

/// `pdftoppm` reports its version on stderr with a non-zero exit, so a probe
/// counts as successful when the tool produced any output at all.
fn probe(tool: &str, arg: &str) -> bool {
    Command::new(tool)
        .arg(arg)
        .output()
        .map(|o| o.status.success() || !o.stderr.is_empty())
        .unwrap_or(false)
}

struct TesseractSession {
    language: String,
    /// Holds rasterized page images; removed on drop.
    scratch: TempDir,
}

impl OcrSession for TesseractSession {
    fn recognize_page(
        &mut self,
        pdf: &Path,
        page: u32,
        zoom: f32,
    ) -> Result<String, ExtractionError> {
        let dpi = (72.0 * zoom).round() as u32;
        let prefix = self.scratch.path().join(format!("page-{page}"));
        let page_arg = page.to_string();

        let raster = Command::new("pdftoppm")
            .args(["-f", &page_arg, "-l", &page_arg, "-r", &dpi.to_string(), "-png"])
            .arg(pdf)
            .arg(&prefix)
            .output()
            .map_err(|e| ExtractionError::OcrPage {
                page,
                reason: format!("pdftoppm failed to run: {e}"),
            })?;
        if !raster.status.success() {
            return Err(ExtractionError::OcrPage {
                page,
                reason: String::from_utf8_lossy(&raster.stderr).trim().to_string(),
            });
        }

        let image = find_rendered_image(self.scratch.path(), &format!("page-{page}"))
            .ok_or_else(|| ExtractionError::OcrPage {
                page,
                reason: "pdftoppm produced no image for this page".into(),
            })?;

        let recognized = Command::new("tesseract")
            .arg(&image)
            .arg("stdout")
            .args(["-l", &self.language])
            .output()
            .map_err(|e| ExtractionError::OcrPage {
                page,
                reason: format!("tesseract failed to run: {e}"),
            })?;
        if !recognized.status.success() {
            return Err(ExtractionError::OcrPage {
                page,
                reason: String::from_utf8_lossy(&recognized.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&recognized.stdout).into_owned())
    }
}

/// `pdftoppm` appends a zero-padded page index to the output prefix, so the
/// exact filename is not known in advance.
fn find_rendered_image(dir: &Path, prefix: &str) -> Option<PathBuf> {
    let entries = std::fs::read_dir(dir).ok()?;
    for entry in entries.flatten() {
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.strip_prefix(prefix).is_some_and(|rest| rest.starts_with('-')) && name.ends_with(".png")
        {
            return Some(entry.path());
        }
    }
    None
}

/// Backend for callers that never reach the OCR path (and for tests that
/// assert it is not reached).
pub struct UnavailableBackend;

impl OcrBackend for UnavailableBackend {
    fn init(&self) -> Result<Box<dyn OcrSession>, ExtractionError> {
        Err(ExtractionError::OcrInit("no OCR backend configured".into()))
    }
}
