//! Text extraction from quote documents.
//!
//! Extracts text from PDFs using:
//! - pdftotext (Poppler) for the text layer, per page
//! - Tesseract OCR via pdftoppm for pages with too little text
//!
//! Recovered text is parsed into quote fields with a table of
//! labeled patterns, and the pipeline assembles one record per
//! document with per-document failure isolation.

mod fields;
mod normalize;
mod pipeline;
mod text_source;

pub use fields::parse_fields;
pub use normalize::clean_number;
pub use pipeline::{IngestionPipeline, QuoteDocument};
pub use text_source::{ExtractionError, PdfTextExtractor, TextSource};
