//! Ingestion of quote data from tabular files.

mod tabular;

pub use tabular::{read_quotes_from_path, records_from_rows, TabularError};
