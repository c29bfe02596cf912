//! Batch orchestration: documents in, quote records out.

use tracing::{debug, warn};

use crate::models::QuoteRecord;

use super::fields::parse_fields;
use super::text_source::TextSource;

/// One raw document paired with its display name.
#[derive(Debug, Clone)]
pub struct QuoteDocument {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl QuoteDocument {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Display name with the file extension stripped.
    fn plan_name(&self) -> &str {
        self.name
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .filter(|stem| !stem.is_empty())
            .unwrap_or(&self.name)
    }
}

/// Runs text extraction and field parsing across a batch of documents.
///
/// Failures are contained at the document boundary: a document that
/// cannot be processed is logged and skipped, and the batch continues.
pub struct IngestionPipeline<S: TextSource> {
    source: S,
}

impl<S: TextSource> IngestionPipeline<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Extract one quote record per recognizable document.
    ///
    /// A document with no recognizable fields is skipped without a
    /// record; that is a "nothing found" result, not an error. Output
    /// preserves input order and may be empty.
    pub fn extract_quotes(&self, documents: &[QuoteDocument]) -> Vec<QuoteRecord> {
        let mut quotes = Vec::new();

        for doc in documents {
            let text = match self.source.extract_text(&doc.bytes, &doc.name) {
                Ok(text) => text,
                Err(e) => {
                    warn!("skipping {}: {}", doc.name, e);
                    continue;
                }
            };

            let fields = parse_fields(&text);
            if fields.is_empty() {
                debug!("no recognizable fields in {}", doc.name);
                continue;
            }

            debug!("extracted fields from {}: {:?}", doc.name, fields);
            quotes.push(QuoteRecord::from_fields(doc.plan_name(), &fields));
        }

        quotes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ExtractionError;

    /// Canned text source: maps document names to fixed text, errors
    /// on names marked corrupt.
    struct StubSource;

    impl TextSource for StubSource {
        fn extract_text(&self, _bytes: &[u8], name: &str) -> Result<String, ExtractionError> {
            match name {
                "corrupt.pdf" => Err(ExtractionError::ExtractionFailed(
                    "unreadable document".to_string(),
                )),
                "blank.pdf" => Ok(String::new()),
                _ => Ok(format!(
                    "{} summary\nPremium: 1,200\nDeductible: 500\nCoinsurance: 20%\n",
                    name
                )),
            }
        }
    }

    fn doc(name: &str) -> QuoteDocument {
        QuoteDocument::new(name, Vec::new())
    }

    #[test]
    fn test_corrupt_document_is_isolated() {
        let pipeline = IngestionPipeline::new(StubSource);
        let docs = vec![doc("alpha.pdf"), doc("corrupt.pdf"), doc("beta.pdf")];

        let quotes = pipeline.extract_quotes(&docs);

        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].plan_name, "alpha");
        assert_eq!(quotes[1].plan_name, "beta");
    }

    #[test]
    fn test_document_without_fields_is_skipped() {
        let pipeline = IngestionPipeline::new(StubSource);
        let quotes = pipeline.extract_quotes(&[doc("blank.pdf")]);
        assert!(quotes.is_empty());
    }

    #[test]
    fn test_record_fields_and_defaults() {
        let pipeline = IngestionPipeline::new(StubSource);
        let quotes = pipeline.extract_quotes(&[doc("gold-plan.pdf")]);

        assert_eq!(quotes.len(), 1);
        let q = &quotes[0];
        assert_eq!(q.plan_name, "gold-plan");
        assert_eq!(q.premium, 1200.0);
        assert_eq!(q.deductible, 500.0);
        assert_eq!(q.coinsurance, 0.2);
        assert_eq!(q.out_of_pocket_max, 0.0);
        assert_eq!(q.coverage_limit, None);
    }

    #[test]
    fn test_empty_batch() {
        let pipeline = IngestionPipeline::new(StubSource);
        assert!(pipeline.extract_quotes(&[]).is_empty());
    }
}
