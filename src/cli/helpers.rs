//! Shared helpers for CLI commands.

use std::path::{Path, PathBuf};

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::Settings;
use crate::extract::{IngestionPipeline, PdfTextExtractor, QuoteDocument};
use crate::ingest::read_quotes_from_path;
use crate::models::QuoteRecord;

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Load quote records from a mixed list of PDF and tabular files.
///
/// PDF extraction failures are contained per document inside the
/// pipeline. Tabular failures are reported per file here and that
/// file is skipped; they do not abort the rest of the batch.
pub fn gather_quotes(files: &[PathBuf], settings: &Settings) -> anyhow::Result<Vec<QuoteRecord>> {
    let (pdfs, tabular): (Vec<&Path>, Vec<&Path>) = files
        .iter()
        .map(PathBuf::as_path)
        .partition(|path| is_pdf(path));

    let mut quotes = Vec::new();

    if !pdfs.is_empty() {
        let extractor = PdfTextExtractor::new()
            .with_min_chars(settings.extraction.min_chars_per_page)
            .with_dpi(settings.extraction.ocr_dpi)
            .with_language(&settings.extraction.tesseract_lang);
        let pipeline = IngestionPipeline::new(extractor);

        let bar = ProgressBar::new(pdfs.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        for path in &pdfs {
            let name = display_name(path);
            bar.set_message(name.clone());

            match std::fs::read(path) {
                Ok(bytes) => {
                    let docs = [QuoteDocument::new(name, bytes)];
                    quotes.extend(pipeline.extract_quotes(&docs));
                }
                Err(e) => {
                    bar.suspend(|| {
                        eprintln!("{} {}: {}", style("error reading").red(), name, e);
                    });
                }
            }
            bar.inc(1);
        }
        bar.finish_and_clear();
    }

    for path in &tabular {
        match read_quotes_from_path(path) {
            Ok(records) => quotes.extend(records),
            Err(e) => {
                eprintln!(
                    "{} {}: {}",
                    style("error reading").red(),
                    display_name(path),
                    e
                );
            }
        }
    }

    Ok(quotes)
}
