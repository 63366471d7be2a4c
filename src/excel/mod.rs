//! Read-only Excel workbook access
//!
//! Thin wrapper over calamine: open a workbook, enumerate sheets, hand out
//! cell ranges. Everything downstream (extraction, comparison, dumping)
//! works on `Range<Data>` and never touches the file again.

mod reader;

pub use reader::{used_columns, used_rows, WorkbookFile};
