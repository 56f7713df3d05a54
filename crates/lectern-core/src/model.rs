use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ExtractionError;

/// A submitted lecture transcript. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Whitespace-delimited token count of the trimmed content.
    pub word_count: usize,
}

impl Transcript {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Transcript {
        let content = content.into();
        let now = Utc::now();
        Transcript {
            id: now.timestamp_millis().to_string(),
            title: title.into(),
            word_count: content.trim().split_whitespace().count(),
            content,
            created_at: now,
        }
    }
}

/// The five note presentation formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteFormat {
    Summary,
    Bullets,
    Concepts,
    Qna,
    Outline,
}

impl NoteFormat {
    pub const ALL: [NoteFormat; 5] = [
        NoteFormat::Summary,
        NoteFormat::Bullets,
        NoteFormat::Concepts,
        NoteFormat::Qna,
        NoteFormat::Outline,
    ];
}

impl fmt::Display for NoteFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoteFormat::Summary => write!(f, "summary"),
            NoteFormat::Bullets => write!(f, "bullets"),
            NoteFormat::Concepts => write!(f, "concepts"),
            NoteFormat::Qna => write!(f, "qna"),
            NoteFormat::Outline => write!(f, "outline"),
        }
    }
}

impl std::str::FromStr for NoteFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<NoteFormat, String> {
        match s.trim().to_lowercase().as_str() {
            "summary" => Ok(NoteFormat::Summary),
            "bullets" => Ok(NoteFormat::Bullets),
            "concepts" => Ok(NoteFormat::Concepts),
            "qna" | "qa" => Ok(NoteFormat::Qna),
            "outline" => Ok(NoteFormat::Outline),
            other => Err(format!(
                "unknown format '{other}'. Available: summary, bullets, concepts, qna, outline"
            )),
        }
    }
}

/// One of the five fixed steps of the note-generation progress sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Analyzing,
    Extracting,
    Structuring,
    Finalizing,
    Complete,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Analyzing => write!(f, "analyzing"),
            Stage::Extracting => write!(f, "extracting"),
            Stage::Structuring => write!(f, "structuring"),
            Stage::Finalizing => write!(f, "finalizing"),
            Stage::Complete => write!(f, "complete"),
        }
    }
}

/// Transient status value emitted during one generation call. Not persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingStatus {
    pub stage: Stage,
    pub progress: u8,
    pub message: String,
}

/// Output of the note-generation pipeline.
///
/// Regenerating for a new format creates a fresh value; the previous one is
/// never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedNotes {
    pub id: String,
    /// Back-reference to the source transcript (lookup only, non-owning).
    pub transcript_id: String,
    pub format: NoteFormat,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Capitalized, frequency-ranked, at most 10, unique.
    pub keywords: Vec<String>,
    /// Short extractive summary of the source content.
    pub summary: String,
}

/// Supported input file kinds for text extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Pdf,
    Docx,
    Pptx,
    Txt,
}

impl FileKind {
    /// Detect the file kind from a declared MIME type, falling back to the
    /// filename extension when the MIME type is absent or generic.
    pub fn detect(mime: Option<&str>, filename: &str) -> Result<FileKind, ExtractionError> {
        if let Some(m) = mime {
            match m.trim().to_lowercase().as_str() {
                "application/pdf" => return Ok(FileKind::Pdf),
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
                | "application/msword" => return Ok(FileKind::Docx),
                "application/vnd.openxmlformats-officedocument.presentationml.presentation"
                | "application/vnd.ms-powerpoint" => return Ok(FileKind::Pptx),
                "text/plain" | "text/markdown" => return Ok(FileKind::Txt),
                _ => {}
            }
        }

        let ext = filename
            .rsplit_once('.')
            .map(|(_, e)| e.to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "pdf" => Ok(FileKind::Pdf),
            "docx" | "doc" => Ok(FileKind::Docx),
            "pptx" | "ppt" => Ok(FileKind::Pptx),
            "txt" | "md" => Ok(FileKind::Txt),
            _ => Err(ExtractionError::UnsupportedFileType(filename.to_string())),
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileKind::Pdf => write!(f, "PDF"),
            FileKind::Docx => write!(f, "DOCX"),
            FileKind::Pptx => write!(f, "PPTX"),
            FileKind::Txt => write!(f, "TXT"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count_derived_from_trimmed_content() {
        let t = Transcript::new("Title", "  one two   three  ");
        assert_eq!(t.word_count, 3);
        assert_eq!(t.content, "  one two   three  ");
    }

    #[test]
    fn test_detect_by_mime_wins_over_extension() {
        let kind = FileKind::detect(Some("application/pdf"), "notes.txt").unwrap();
        assert_eq!(kind, FileKind::Pdf);
    }

    #[test]
    fn test_detect_by_extension_when_mime_generic() {
        let kind = FileKind::detect(Some("application/octet-stream"), "slides.PPTX").unwrap();
        assert_eq!(kind, FileKind::Pptx);
        let kind = FileKind::detect(None, "readme.md").unwrap();
        assert_eq!(kind, FileKind::Txt);
    }

    #[test]
    fn test_detect_unsupported() {
        let err = FileKind::detect(None, "image.png").unwrap_err();
        assert!(err.to_string().contains("Unsupported file type"));
    }

    #[test]
    fn test_note_format_round_trip() {
        for f in NoteFormat::ALL {
            let parsed: NoteFormat = f.to_string().parse().unwrap();
            assert_eq!(parsed, f);
        }
        assert!("prose".parse::<NoteFormat>().is_err());
    }
}
