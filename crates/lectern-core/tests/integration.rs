//! Integration tests for the extract_text() / generate_notes() pipeline.
//!
//! PDF payloads are built in-memory with lopdf and OCR runs through stub
//! backends, so these tests run without poppler-utils or tesseract.

use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use lectern_core::extraction::ocr::{OcrBackend, OcrSession, UnavailableBackend};
use lectern_core::{
    extract_text, generate_notes, ExtractionError, FileKind, NoProgress, NoteFormat, Transcript,
};

/// Build a PDF where each entry in `page_texts` becomes one page; `None`
/// produces a page with no text operators (a "scanned" page).
fn build_pdf(page_texts: &[Option<&str>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in page_texts {
        let operations = match text {
            Some(text) => vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![50.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
            None => vec![],
        };
        let content = Content { operations };
        let content_id =
            doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

/// Stub OCR backend that records recognized pages and release of the session.
struct StubOcr {
    pages_recognized: Arc<AtomicUsize>,
    released: Arc<AtomicBool>,
    /// Fail recognition once this many pages have been processed.
    fail_after: Option<usize>,
}

struct StubSession {
    pages_recognized: Arc<AtomicUsize>,
    released: Arc<AtomicBool>,
    fail_after: Option<usize>,
}

impl OcrBackend for StubOcr {
    fn init(&self) -> Result<Box<dyn OcrSession>, ExtractionError> {
        Ok(Box::new(StubSession {
            pages_recognized: self.pages_recognized.clone(),
            released: self.released.clone(),
            fail_after: self.fail_after,
        }))
    }
}

impl OcrSession for StubSession {
    fn recognize_page(
        &mut self,
        _pdf: &Path,
        page: u32,
        zoom: f32,
    ) -> Result<String, ExtractionError> {
        assert!((zoom - 1.5).abs() < f32::EPSILON);
        let done = self.pages_recognized.fetch_add(1, Ordering::SeqCst);
        if let Some(limit) = self.fail_after {
            if done >= limit {
                return Err(ExtractionError::OcrPage {
                    page,
                    reason: "stub failure".into(),
                });
            }
        }
        Ok(format!(
            "Recognized text content of scanned page {page} from the stub engine."
        ))
    }
}

impl Drop for StubSession {
    fn drop(&mut self) {
        self.released.store(true, Ordering::SeqCst);
    }
}

fn stub_ocr(fail_after: Option<usize>) -> (StubOcr, Arc<AtomicUsize>, Arc<AtomicBool>) {
    let pages = Arc::new(AtomicUsize::new(0));
    let released = Arc::new(AtomicBool::new(false));
    (
        StubOcr {
            pages_recognized: pages.clone(),
            released: released.clone(),
            fail_after,
        },
        pages,
        released,
    )
}

/// Progress sink recording every (percent, message) update.
#[derive(Default)]
struct Recorder {
    updates: Vec<(u8, String)>,
}

impl lectern_core::ProgressSink for Recorder {
    fn on_progress(&mut self, percent: u8, message: &str) {
        self.updates.push((percent, message.to_string()));
    }
}

// ---------------------------------------------------------------------------
// Test 1: text-layer PDF never touches OCR
// ---------------------------------------------------------------------------
#[test]
fn text_layer_pdf_skips_ocr() {
    let bytes = build_pdf(&[
        Some("The lecture opens with a survey of thermodynamic principles and definitions."),
        Some("Entropy is introduced as a measure of disorder within a closed system."),
    ]);

    // UnavailableBackend fails init, so reaching OCR would fail the call.
    let text = extract_text(&bytes, FileKind::Pdf, &UnavailableBackend, &mut NoProgress).unwrap();
    assert!(text.contains("thermodynamic principles"));
    assert!(text.contains("Entropy is introduced"));
}

// ---------------------------------------------------------------------------
// Test 2: scanned PDF falls back to OCR, capped at 10 pages
// ---------------------------------------------------------------------------
#[test]
fn scanned_pdf_triggers_ocr_with_ten_page_cap() {
    let pages: Vec<Option<&str>> = vec![None; 12];
    let bytes = build_pdf(&pages);

    let (backend, recognized, released) = stub_ocr(None);
    let text = extract_text(&bytes, FileKind::Pdf, &backend, &mut NoProgress).unwrap();

    assert_eq!(recognized.load(Ordering::SeqCst), 10);
    assert!(released.load(Ordering::SeqCst));
    assert!(text.contains("scanned page 1 "));
    assert!(text.contains("scanned page 10 "));
    assert!(!text.contains("scanned page 11"));
}

// ---------------------------------------------------------------------------
// Test 3: OCR session is released when recognition fails mid-loop
// ---------------------------------------------------------------------------
#[test]
fn ocr_session_released_on_mid_loop_failure() {
    let pages: Vec<Option<&str>> = vec![None; 5];
    let bytes = build_pdf(&pages);

    let (backend, recognized, released) = stub_ocr(Some(2));
    let err = extract_text(&bytes, FileKind::Pdf, &backend, &mut NoProgress).unwrap_err();

    assert!(matches!(err, ExtractionError::OcrPage { .. }));
    assert_eq!(recognized.load(Ordering::SeqCst), 3);
    assert!(released.load(Ordering::SeqCst));
}

// ---------------------------------------------------------------------------
// Test 4: a scanned PDF whose OCR yields almost nothing fails cleanly
// ---------------------------------------------------------------------------
#[test]
fn scanned_pdf_with_no_meaningful_text_fails() {
    struct SilentOcr;
    struct SilentSession;
    impl OcrBackend for SilentOcr {
        fn init(&self) -> Result<Box<dyn OcrSession>, ExtractionError> {
            Ok(Box::new(SilentSession))
        }
    }
    impl OcrSession for SilentSession {
        fn recognize_page(
            &mut self,
            _pdf: &Path,
            _page: u32,
            _zoom: f32,
        ) -> Result<String, ExtractionError> {
            Ok("  . \n".into())
        }
    }

    let bytes = build_pdf(&[None, None]);
    let err = extract_text(&bytes, FileKind::Pdf, &SilentOcr, &mut NoProgress).unwrap_err();
    assert!(matches!(err, ExtractionError::NoReadableText(_)));
}

// ---------------------------------------------------------------------------
// Test 5: PDF progress is monotone and ends at 100
// ---------------------------------------------------------------------------
#[test]
fn pdf_progress_is_monotone_and_completes() {
    let bytes = build_pdf(&[
        Some("A long first page about the principles of supervised machine learning methods."),
        Some("A long second page describing gradient descent and its convergence behavior."),
    ]);

    let mut recorder = Recorder::default();
    extract_text(&bytes, FileKind::Pdf, &UnavailableBackend, &mut recorder).unwrap();

    assert!(!recorder.updates.is_empty());
    for pair in recorder.updates.windows(2) {
        assert!(pair[0].0 <= pair[1].0, "progress went backwards: {pair:?}");
    }
    assert_eq!(recorder.updates.last().unwrap().0, 100);
}

// ---------------------------------------------------------------------------
// Test 6: DOCX end-to-end through extract_text
// ---------------------------------------------------------------------------
#[test]
fn docx_end_to_end() {
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    let mut zip = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    zip.start_file("word/document.xml", SimpleFileOptions::default())
        .unwrap();
    zip.write_all(
        br#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
            <w:body>
                <w:p><w:r><w:t>Lecture one covers cell biology.</w:t></w:r></w:p>
                <w:p><w:r><w:t>Lecture two covers genetics.</w:t></w:r></w:p>
            </w:body>
        </w:document>"#,
    )
    .unwrap();
    let bytes = zip.finish().unwrap().into_inner();

    let text = extract_text(&bytes, FileKind::Docx, &UnavailableBackend, &mut NoProgress).unwrap();
    assert!(text.contains("Lecture one covers cell biology."));
    assert!(text.contains("Lecture two covers genetics."));
}

// ---------------------------------------------------------------------------
// Test 7: summary format on a short three-sentence transcript
// ---------------------------------------------------------------------------
#[test]
fn summary_format_worked_example() {
    let transcript = Transcript::new(
        "Machine Learning Basics",
        "Machine learning is a method. It is important. Models learn from data.",
    );
    let notes = generate_notes(&transcript, NoteFormat::Summary, &mut NoProgress);

    assert!(notes.content.starts_with("# Machine Learning Basics"));
    assert!(notes.content.contains("## Executive Summary"));
    assert!(notes.content.contains(
        "Machine learning is a method. It is important. Models learn from data."
    ));

    for expected in ["Machine", "Learning", "Method"] {
        assert!(
            notes.keywords.iter().any(|k| k == expected),
            "missing keyword {expected}: {:?}",
            notes.keywords
        );
    }
    for excluded in ["Is", "A", "It"] {
        assert!(!notes.keywords.iter().any(|k| k == excluded));
    }
}

// ---------------------------------------------------------------------------
// Test 8: all five formats from one transcript
// ---------------------------------------------------------------------------
#[test]
fn five_formats_distinct_content_shared_keywords_and_summary() {
    let transcript = Transcript::new(
        "Networks",
        "A network protocol is a set of rules for exchanging data. \
         It is important to understand layering because each layer isolates concerns. \
         First, the physical layer moves raw bits. \
         Then the transport layer provides reliability with 3 core mechanisms. \
         Finally, applications exchange structured messages.",
    );

    let mut contents = std::collections::HashSet::new();
    let baseline = generate_notes(&transcript, NoteFormat::Summary, &mut NoProgress);
    for format in NoteFormat::ALL {
        let notes = generate_notes(&transcript, format, &mut NoProgress);
        assert!(!notes.content.is_empty());
        assert_eq!(notes.keywords, baseline.keywords);
        assert_eq!(notes.summary, baseline.summary);
        contents.insert(notes.content);
    }
    assert_eq!(contents.len(), 5);
}

// ---------------------------------------------------------------------------
// Test 9: generation progress runs the five fixed stages
// ---------------------------------------------------------------------------
#[test]
fn generation_progress_runs_fixed_stages() {
    let transcript = Transcript::new("T", "A single reasonable sentence for the generator.");
    let mut recorder = Recorder::default();
    generate_notes(&transcript, NoteFormat::Bullets, &mut recorder);

    let percents: Vec<u8> = recorder.updates.iter().map(|(p, _)| *p).collect();
    assert_eq!(percents, vec![20, 45, 70, 90, 100]);
    assert!(recorder.updates[0].1.contains("Analyzing"));
    assert!(recorder.updates[4].1.contains("successfully"));
}
