//! SheetSync - Excel workbook structure extraction, comparison and validation
//!
//! This library defines, validates and persists the structural shape of a
//! workbook (column headers, header row position, sheet layout) independent
//! of its data content.
//!
//! # Features
//!
//! - Structure extraction with per-column type inference
//! - Structural diffing against a previously saved structure
//! - JSON Schema validation of structures and data rows
//! - Portable JSON/YAML structure files with a round-trip guarantee
//! - YAML content dumps annotated with the structure as a schema
//!
//! # Example
//!
//! ```no_run
//! use sheetsync::SheetSync;
//! use std::path::Path;
//!
//! let mut sync = SheetSync::open("report.xlsx")?;
//! let structure = sync.extract_structure(None)?;
//! println!("Columns: {}", structure.columns.len());
//!
//! sync.export_structure(Path::new("report.structure.json"), None)?;
//! let result = sync.compare_structure(Path::new("report.structure.json"), None)?;
//! assert!(result.is_matching);
//! # Ok::<(), sheetsync::SyncError>(())
//! ```

pub mod cli;
pub mod core;
pub mod dump;
pub mod error;
pub mod excel;
pub mod store;
pub mod sync;
pub mod types;

// Re-export commonly used types
pub use crate::core::{compare, ComparisonResult, Issue};
pub use error::{SyncError, SyncResult};
pub use sync::SheetSync;
pub use types::{classify, CellType, ColumnDefinition, StructureModel};
