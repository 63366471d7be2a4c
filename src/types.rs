use calamine::Data;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

//==============================================================================
// Cell type tags
//==============================================================================

/// Type tag assigned to a column by sampling its data cells.
///
/// `Mixed` is never produced by [`classify`]; it only arises at column level
/// when sampled cells disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    String,
    Number,
    Date,
    Boolean,
    Empty,
    Mixed,
}

impl CellType {
    /// Get the type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            CellType::String => "string",
            CellType::Number => "number",
            CellType::Date => "date",
            CellType::Boolean => "boolean",
            CellType::Empty => "empty",
            CellType::Mixed => "mixed",
        }
    }
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a single cell value into a [`CellType`].
///
/// Total over every calamine cell variant. Blank cells (empty or
/// whitespace-only strings) classify as `Empty`; error cells classify as
/// `String` since they surface as display text when reading values only.
pub fn classify(cell: &Data) -> CellType {
    match cell {
        Data::Empty => CellType::Empty,
        Data::String(s) if s.trim().is_empty() => CellType::Empty,
        Data::String(_) => CellType::String,
        Data::Int(_) | Data::Float(_) => CellType::Number,
        Data::Bool(_) => CellType::Boolean,
        Data::DateTime(_) | Data::DateTimeIso(_) | Data::DurationIso(_) => CellType::Date,
        Data::Error(_) => CellType::String,
    }
}

/// Check whether a cell counts as blank for span and type-inference purposes
pub fn is_blank(cell: Option<&Data>) -> bool {
    match cell {
        None => true,
        Some(c) => classify(c) == CellType::Empty,
    }
}

//==============================================================================
// Structure model
//==============================================================================

/// One column of a sheet's structure: physical position, header name, and the
/// type inferred from its data cells. Immutable once extracted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    pub index: usize,
    /// Header cell value; empty string when the header cell is blank
    pub name: String,
    #[serde(rename = "type")]
    pub inferred_type: CellType,
}

impl ColumnDefinition {
    pub fn new(index: usize, name: impl Into<String>, inferred_type: CellType) -> Self {
        Self {
            index,
            name: name.into(),
            inferred_type,
        }
    }
}

/// The normalized shape of one sheet: header row position plus ordered column
/// definitions, independent of content.
///
/// The serde shape of this struct *is* the portable representation
/// (`header_row` / `columns` / `file_properties`), so saving and loading
/// round-trip by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureModel {
    /// 1-based row containing the headers
    pub header_row: u32,
    /// Sheet column order; `index` is unique and contiguous from 0.
    /// Empty for a blank sheet.
    pub columns: Vec<ColumnDefinition>,
    /// Auxiliary sheet/file properties (sheet name, row count, ...)
    #[serde(rename = "file_properties", default)]
    pub sheet_metadata: BTreeMap<String, serde_json::Value>,
}

impl StructureModel {
    /// Check the model's invariants: header row at least 1, column indices
    /// unique and contiguous from 0 in sheet order.
    pub fn check_invariants(&self) -> Result<(), String> {
        if self.header_row < 1 {
            return Err("header_row must be >= 1".to_string());
        }
        for (position, column) in self.columns.iter().enumerate() {
            if column.index != position {
                return Err(format!(
                    "column indices must be contiguous from 0: found index {} at position {}",
                    column.index, position
                ));
            }
        }
        Ok(())
    }

    /// Look up a column by its physical index
    pub fn column(&self, index: usize) -> Option<&ColumnDefinition> {
        self.columns.get(index).filter(|c| c.index == index)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

//==============================================================================
// Metadata keys
//==============================================================================

/// Keys used in `sheet_metadata` by the extractor. Stored under
/// `file_properties` in the portable representation.
pub mod metadata {
    pub const FILENAME: &str = "filename";
    pub const SHEET_NAME: &str = "sheet_name";
    pub const SHEET_COUNT: &str = "sheet_count";
    pub const ROWS: &str = "rows";
    pub const COLUMNS_COUNT: &str = "columns_count";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_blank_variants() {
        assert_eq!(classify(&Data::Empty), CellType::Empty);
        assert_eq!(classify(&Data::String("".to_string())), CellType::Empty);
        assert_eq!(classify(&Data::String("   ".to_string())), CellType::Empty);
    }

    #[test]
    fn test_classify_scalars() {
        assert_eq!(classify(&Data::String("Alice".to_string())), CellType::String);
        assert_eq!(classify(&Data::Int(30)), CellType::Number);
        assert_eq!(classify(&Data::Float(1.5)), CellType::Number);
        assert_eq!(classify(&Data::Bool(true)), CellType::Boolean);
        assert_eq!(
            classify(&Data::DateTimeIso("2023-01-01".to_string())),
            CellType::Date
        );
    }

    #[test]
    fn test_cell_type_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&CellType::Number).unwrap(), "\"number\"");
        assert_eq!(serde_json::to_string(&CellType::Mixed).unwrap(), "\"mixed\"");
        let parsed: CellType = serde_json::from_str("\"date\"").unwrap();
        assert_eq!(parsed, CellType::Date);
    }

    #[test]
    fn test_check_invariants_contiguous() {
        let model = StructureModel {
            header_row: 1,
            columns: vec![
                ColumnDefinition::new(0, "Name", CellType::String),
                ColumnDefinition::new(1, "Age", CellType::Number),
            ],
            sheet_metadata: BTreeMap::new(),
        };
        assert!(model.check_invariants().is_ok());
    }

    #[test]
    fn test_check_invariants_rejects_gap() {
        let model = StructureModel {
            header_row: 1,
            columns: vec![
                ColumnDefinition::new(0, "A", CellType::String),
                ColumnDefinition::new(2, "C", CellType::String),
            ],
            sheet_metadata: BTreeMap::new(),
        };
        assert!(model.check_invariants().is_err());
    }

    #[test]
    fn test_check_invariants_rejects_header_row_zero() {
        let model = StructureModel {
            header_row: 0,
            columns: vec![],
            sheet_metadata: BTreeMap::new(),
        };
        assert!(model.check_invariants().is_err());
    }

    #[test]
    fn test_empty_columns_is_valid() {
        // Blank sheet state is representable, not an error
        let model = StructureModel {
            header_row: 1,
            columns: vec![],
            sheet_metadata: BTreeMap::new(),
        };
        assert!(model.check_invariants().is_ok());
    }
}
