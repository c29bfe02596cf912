//! Per-page text acquisition with an OCR fallback.
//!
//! Uses external tools: pdftotext/pdfinfo/pdftoppm (Poppler) and
//! tesseract. Pages whose text layer is too thin to be real content
//! are rasterized at 300 DPI and run through OCR instead. Failures
//! degrade per page or per document; they never abort a batch.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;
use thiserror::Error;

/// Handle command output, extracting stdout on success or returning appropriate error.
fn handle_cmd_output(
    result: std::io::Result<std::process::Output>,
    tool_name: &str,
    error_prefix: &str,
) -> Result<String, ExtractionError> {
    match result {
        Ok(output) => {
            if output.status.success() {
                Ok(String::from_utf8_lossy(&output.stdout).to_string())
            } else {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(ExtractionError::ExtractionFailed(format!(
                    "{}: {}",
                    error_prefix, stderr
                )))
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ExtractionError::ToolNotFound(tool_name.to_string()))
        }
        Err(e) => Err(ExtractionError::Io(e)),
    }
}

/// Check command status, returning appropriate error on failure.
fn check_cmd_status(
    result: std::io::Result<std::process::ExitStatus>,
    tool_name: &str,
    error_msg: &str,
) -> Result<(), ExtractionError> {
    match result {
        Ok(s) if s.success() => Ok(()),
        Ok(_) => Err(ExtractionError::ExtractionFailed(error_msg.to_string())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ExtractionError::ToolNotFound(tool_name.to_string()))
        }
        Err(e) => Err(ExtractionError::Io(e)),
    }
}

/// Check if a binary is available in PATH.
fn check_binary(name: &str) -> bool {
    Command::new("which")
        .arg(name)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Errors that can occur during text extraction.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("External tool not found: {0}")]
    ToolNotFound(String),

    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Source of raw text for a quote document.
///
/// The pipeline is generic over this seam so batch behavior can be
/// tested without Poppler or Tesseract installed.
pub trait TextSource {
    /// Extract all recoverable text from a document, in page order.
    ///
    /// Degraded results (missing pages, empty text) are not errors;
    /// an `Err` means the document could not be processed at all.
    fn extract_text(&self, bytes: &[u8], name: &str) -> Result<String, ExtractionError>;
}

/// PDF text extractor with per-page OCR fallback.
pub struct PdfTextExtractor {
    /// Minimum non-whitespace characters for a page's text layer to
    /// count as real content (headers/footers alone fall below this).
    min_chars_per_page: usize,
    /// Rasterization resolution for the OCR path.
    ocr_dpi: u32,
    /// Tesseract language setting.
    tesseract_lang: String,
}

impl Default for PdfTextExtractor {
    fn default() -> Self {
        Self {
            min_chars_per_page: 50,
            ocr_dpi: 300,
            tesseract_lang: "eng".to_string(),
        }
    }
}

impl PdfTextExtractor {
    /// Create a new extractor with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set minimum characters per page threshold.
    pub fn with_min_chars(mut self, min_chars: usize) -> Self {
        self.min_chars_per_page = min_chars;
        self
    }

    /// Set rasterization DPI for the OCR fallback.
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.ocr_dpi = dpi;
        self
    }

    /// Set Tesseract language.
    pub fn with_language(mut self, lang: &str) -> Self {
        self.tesseract_lang = lang.to_string();
        self
    }

    /// Extract text for every page of a document.
    ///
    /// Each page tries the text layer first; pages below the content
    /// threshold fall back to OCR independently, so one page's OCR
    /// failure never blocks the rest. A document that cannot be
    /// opened at all contributes an empty string.
    fn extract_pdf(&self, pdf_path: &Path, name: &str) -> String {
        let Some(page_count) = self.pdf_page_count(pdf_path) else {
            tracing::warn!("could not read {}: not a parseable PDF", name);
            return String::new();
        };

        let mut page_texts: Vec<String> = Vec::with_capacity(page_count as usize);

        for page in 1..=page_count {
            let text = self
                .extract_page_text(pdf_path, page)
                .unwrap_or_default();
            let content_chars = text.chars().filter(|c| !c.is_whitespace()).count();

            if content_chars >= self.min_chars_per_page {
                page_texts.push(text);
                continue;
            }

            match self.ocr_page(pdf_path, page) {
                Ok(ocr_text) => page_texts.push(ocr_text),
                Err(e) => {
                    tracing::warn!("OCR failed on {} (page {}): {}", name, page, e);
                }
            }
        }

        page_texts.join("\n")
    }

    /// Get the page count of a PDF, or None if it cannot be opened.
    fn pdf_page_count(&self, pdf_path: &Path) -> Option<u32> {
        let output = Command::new("pdfinfo").arg(pdf_path).output().ok()?;

        if !output.status.success() {
            return None;
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        for line in stdout.lines() {
            if line.starts_with("Pages:") {
                return line.split_whitespace().nth(1).and_then(|s| s.parse().ok());
            }
        }
        None
    }

    /// Run pdftotext on a single page.
    fn extract_page_text(&self, pdf_path: &Path, page: u32) -> Result<String, ExtractionError> {
        let page_str = page.to_string();
        let output = Command::new("pdftotext")
            .args(["-layout", "-enc", "UTF-8", "-f", &page_str, "-l", &page_str])
            .arg(pdf_path)
            .arg("-") // Output to stdout
            .output();

        handle_cmd_output(
            output,
            "pdftotext (install poppler-utils)",
            &format!("pdftotext failed on page {}", page),
        )
    }

    /// Rasterize a single page and run Tesseract on the image.
    fn ocr_page(&self, pdf_path: &Path, page: u32) -> Result<String, ExtractionError> {
        let temp_dir = TempDir::new()?;
        let temp_path = temp_dir.path();
        let page_str = page.to_string();

        let status = Command::new("pdftoppm")
            .args(["-png", "-r", &self.ocr_dpi.to_string(), "-f", &page_str, "-l", &page_str])
            .arg(pdf_path)
            .arg(temp_path.join("page"))
            .status();

        check_cmd_status(
            status,
            "pdftoppm (install poppler-utils)",
            &format!("pdftoppm failed to convert page {}", page),
        )?;

        let Some(image_path) = find_page_image(temp_path, page) else {
            return Err(ExtractionError::ExtractionFailed(format!(
                "No image generated for page {}",
                page
            )));
        };

        let output = Command::new("tesseract")
            .arg(&image_path)
            .arg("stdout")
            .args(["-l", &self.tesseract_lang])
            .output();

        handle_cmd_output(output, "tesseract (install tesseract-ocr)", "tesseract failed")
    }

    /// Check if required external tools are available.
    pub fn check_tools() -> Vec<(String, bool)> {
        ["pdftotext", "pdfinfo", "pdftoppm", "tesseract"]
            .iter()
            .map(|tool| (tool.to_string(), check_binary(tool)))
            .collect()
    }
}

impl TextSource for PdfTextExtractor {
    fn extract_text(&self, bytes: &[u8], name: &str) -> Result<String, ExtractionError> {
        let temp_dir = TempDir::new()?;
        let pdf_path = temp_dir.path().join("document.pdf");
        std::fs::write(&pdf_path, bytes)?;

        Ok(self.extract_pdf(&pdf_path, name))
    }
}

/// Find the image file pdftoppm generated for a page.
///
/// pdftoppm pads the page number to the document's width, so look for
/// page-1.png through page-0001.png.
fn find_page_image(temp_path: &Path, page: u32) -> Option<std::path::PathBuf> {
    for digits in [1, 2, 3, 4] {
        let filename = format!("page-{:0width$}.png", page, width = digits);
        let path = temp_path.join(&filename);
        if path.exists() {
            return Some(path);
        }
    }
    None
}
