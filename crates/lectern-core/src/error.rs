#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("{kind} file is too large. Please use a file smaller than {limit_mb}MB.")]
    FileTooLarge { kind: &'static str, limit_mb: u64 },

    #[error("failed to load document: {0}")]
    InvalidDocument(String),

    #[error(
        "legacy .doc format is not supported. Please convert the file to .docx and try again."
    )]
    UnsupportedLegacyFormat,

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("no readable text found: {0}")]
    NoReadableText(String),

    #[error("failed to initialize OCR engine: {0}")]
    OcrInit(String),

    #[error("OCR failed on page {page}: {reason}")]
    OcrPage { page: u32, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
