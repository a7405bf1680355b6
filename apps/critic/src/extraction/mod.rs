//! Document text extraction.
//!
//! Every path is best-effort: failures are logged and degrade to an empty
//! string so a corrupt upload still yields a (boilerplate) analysis.

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

pub mod ocr;

pub use ocr::TesseractOcr;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tiff"];

/// Document format declared by the uploader, usually derived from the file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Text,
    Image,
    Unsupported(String),
}

impl DocumentFormat {
    /// Maps a file name's extension (case-insensitive) to a format.
    pub fn from_file_name(name: &str) -> Self {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "pdf" => DocumentFormat::Pdf,
            "docx" => DocumentFormat::Docx,
            "txt" => DocumentFormat::Text,
            e if IMAGE_EXTENSIONS.contains(&e) => DocumentFormat::Image,
            other => DocumentFormat::Unsupported(other.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),

    #[error("OCR failed: {0}")]
    Ocr(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Dispatches raw document bytes to the matching extraction path.
#[derive(Debug, Clone)]
pub struct TextExtractor {
    ocr: TesseractOcr,
}

impl TextExtractor {
    pub fn new(ocr: TesseractOcr) -> Self {
        Self { ocr }
    }

    /// Best-effort plain text for `bytes`; empty on any failure.
    pub fn extract(&self, bytes: &[u8], format: &DocumentFormat) -> String {
        let result = match format {
            DocumentFormat::Pdf => extract_pdf(bytes),
            DocumentFormat::Docx => extract_docx(bytes),
            DocumentFormat::Text => Ok(decode_text(bytes)),
            DocumentFormat::Image => self.ocr.recognize(bytes),
            DocumentFormat::Unsupported(ext) => {
                warn!("Unsupported document format: {ext:?}");
                return String::new();
            }
        };

        match result {
            Ok(text) => {
                debug!("Extracted {} chars from {:?} document", text.len(), format);
                text
            }
            Err(e) => {
                warn!("{e}; continuing with empty text");
                String::new()
            }
        }
    }

    /// Reads `path` and extracts it according to its extension.
    pub fn extract_file(&self, path: &Path) -> String {
        let format = DocumentFormat::from_file_name(&path.to_string_lossy());
        match std::fs::read(path) {
            Ok(bytes) => self.extract(&bytes, &format),
            Err(e) => {
                warn!("Failed to read {}: {e}", path.display());
                String::new()
            }
        }
    }
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new(TesseractOcr::default())
    }
}

/// Page text concatenated in order. pdf-extract panics on some malformed
/// inputs, so the panic is caught and reported as an error.
fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractionError> {
    panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes)))
        .map_err(|_| ExtractionError::Pdf("parser panicked".to_string()))?
        .map_err(|e| ExtractionError::Pdf(e.to_string()))
}

/// Paragraph text in document order, one paragraph per line.
fn extract_docx(bytes: &[u8]) -> Result<String, ExtractionError> {
    use docx_rs::{DocumentChild, ParagraphChild, RunChild};

    let docx = docx_rs::read_docx(bytes).map_err(|e| ExtractionError::Docx(e.to_string()))?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(para) => Some(
                para.children
                    .iter()
                    .filter_map(|pc| match pc {
                        ParagraphChild::Run(run) => Some(
                            run.children
                                .iter()
                                .filter_map(|rc| match rc {
                                    RunChild::Text(t) => Some(t.text.as_str()),
                                    _ => None,
                                })
                                .collect::<String>(),
                        ),
                        _ => None,
                    })
                    .collect::<String>(),
            ),
            _ => None,
        })
        .collect();

    Ok(paragraphs.join("\n"))
}

/// UTF-8 decode that drops invalid byte sequences instead of failing.
pub fn decode_text(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_format_from_file_name() {
        assert_eq!(DocumentFormat::from_file_name("cv.PDF"), DocumentFormat::Pdf);
        assert_eq!(DocumentFormat::from_file_name("cv.docx"), DocumentFormat::Docx);
        assert_eq!(DocumentFormat::from_file_name("notes.txt"), DocumentFormat::Text);
        assert_eq!(DocumentFormat::from_file_name("scan.JPEG"), DocumentFormat::Image);
        assert_eq!(DocumentFormat::from_file_name("scan.tiff"), DocumentFormat::Image);
        assert_eq!(
            DocumentFormat::from_file_name("resume.xyz"),
            DocumentFormat::Unsupported("xyz".to_string())
        );
        assert_eq!(
            DocumentFormat::from_file_name("README"),
            DocumentFormat::Unsupported(String::new())
        );
    }

    #[test]
    fn test_unsupported_format_yields_empty_text() {
        let extractor = TextExtractor::default();
        let text = extractor.extract(b"anything", &DocumentFormat::Unsupported("xyz".into()));
        assert_eq!(text, "");
    }

    #[test]
    fn test_decode_text_drops_invalid_bytes() {
        let bytes = b"Rust \xff\xfedeveloper \xe2\x9c\x93";
        assert_eq!(decode_text(bytes), "Rust developer \u{2713}");
    }

    #[test]
    fn test_corrupt_pdf_yields_empty_text() {
        let extractor = TextExtractor::default();
        assert_eq!(extractor.extract(b"%PDF-1.7 garbage", &DocumentFormat::Pdf), "");
    }

    #[test]
    fn test_corrupt_docx_yields_empty_text() {
        let extractor = TextExtractor::default();
        assert_eq!(extractor.extract(b"not a zip archive", &DocumentFormat::Docx), "");
    }

    #[test]
    fn test_docx_paragraphs_in_order() {
        use docx_rs::{Docx, Paragraph, Run};

        let mut buf = std::io::Cursor::new(Vec::new());
        Docx::new()
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Jane Doe")))
            .add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text("Rust"))
                    .add_run(Run::new().add_text("acean")),
            )
            .build()
            .pack(&mut buf)
            .unwrap();

        let text = TextExtractor::default().extract(buf.get_ref(), &DocumentFormat::Docx);
        assert_eq!(text, "Jane Doe\nRustacean");
    }

    #[test]
    fn test_extract_file_reads_text_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(b"Built a kafka pipeline").unwrap();

        let text = TextExtractor::default().extract_file(file.path());
        assert_eq!(text, "Built a kafka pipeline");
    }

    #[test]
    fn test_extract_file_missing_path_yields_empty_text() {
        let text = TextExtractor::default().extract_file(Path::new("/nonexistent/cv.txt"));
        assert_eq!(text, "");
    }
}
