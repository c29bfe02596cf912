//! `tools` command: report external tool availability.

use console::style;

use crate::extract::PdfTextExtractor;

pub fn run() -> anyhow::Result<()> {
    println!("External extraction tools:");
    for (tool, available) in PdfTextExtractor::check_tools() {
        let status = if available {
            style("found").green()
        } else {
            style("missing").red()
        };
        println!("  {:<12} {}", tool, status);
    }
    println!();
    println!("pdftotext, pdfinfo, pdftoppm: install poppler-utils");
    println!("tesseract: install tesseract-ocr");

    Ok(())
}
