//! OCR for scanned resumes via the `tesseract` executable.
//!
//! The image bytes are written to a temporary file (removed on drop, on every
//! exit path) and `tesseract <file> stdout` is run against it.

use std::io::Write;
use std::process::Command;

use tracing::debug;

use crate::extraction::ExtractionError;

#[derive(Debug, Clone)]
pub struct TesseractOcr {
    command: String,
    lang: String,
}

impl Default for TesseractOcr {
    fn default() -> Self {
        Self::new("tesseract")
    }
}

impl TesseractOcr {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            lang: "eng".to_string(),
        }
    }

    /// Recognizes text in an image (PNG, JPEG, BMP, TIFF).
    pub fn recognize(&self, image: &[u8]) -> Result<String, ExtractionError> {
        if image.is_empty() {
            return Err(ExtractionError::Ocr("empty image".to_string()));
        }

        let mut file = tempfile::Builder::new().prefix("resume-ocr-").tempfile()?;
        file.write_all(image)?;
        file.flush()?;

        debug!("Running {} on {}", self.command, file.path().display());

        let output = Command::new(&self.command)
            .arg(file.path())
            .arg("stdout")
            .arg("-l")
            .arg(&self.lang)
            .output()
            .map_err(|e| ExtractionError::Ocr(format!("could not run {}: {e}", self.command)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractionError::Ocr(format!(
                "{} exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::{DocumentFormat, TextExtractor};

    #[test]
    fn test_empty_image_is_an_error() {
        let err = TesseractOcr::default().recognize(&[]).unwrap_err();
        assert!(matches!(err, ExtractionError::Ocr(_)));
    }

    #[test]
    fn test_missing_binary_is_an_error() {
        let ocr = TesseractOcr::new("/nonexistent/tesseract-binary");
        let err = ocr.recognize(b"\x89PNG\r\n\x1a\n").unwrap_err();
        assert!(err.to_string().contains("could not run"));
    }

    #[test]
    fn test_ocr_failure_degrades_to_empty_text() {
        let extractor = TextExtractor::new(TesseractOcr::new("/nonexistent/tesseract-binary"));
        assert_eq!(extractor.extract(b"\x89PNG\r\n\x1a\n", &DocumentFormat::Image), "");
    }
}
