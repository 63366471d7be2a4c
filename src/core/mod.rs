//! Structure extraction, comparison and validation
//!
//! The rules for what constitutes a workbook's structure live here:
//! header-row handling and column type inference (`extractor`), the diff
//! between two structures (`comparator`), and JSON Schema checks
//! (`validator`). Everything else in the crate is plumbing around this.

pub mod comparator;
pub mod extractor;
pub mod validator;

pub use comparator::{compare, ComparisonResult, Issue};
pub use extractor::{extract, SheetContext, TYPE_SAMPLE_ROWS};
