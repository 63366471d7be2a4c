//! YAML content export: workbook rows annotated with the structure as a
//! schema, mirroring the portable representation under a `schema:` key and
//! the rows under `data:`.

use crate::error::SyncResult;
use crate::excel::used_rows;
use crate::types::StructureModel;
use calamine::{Data, DataType, Range};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Write the `{schema, data}` document for one sheet to `target`
pub fn export_yaml(
    structure: &StructureModel,
    range: &Range<Data>,
    sheet_name: &str,
    target: &Path,
) -> SyncResult<()> {
    let document = content_document(structure, range, sheet_name)?;
    fs::write(target, serde_yaml::to_string(&document)?)?;
    Ok(())
}

/// Build the dump document: the structure in its portable shape plus one
/// map per data row, keyed by column name. Blank cells, blank-named
/// columns and fully-blank rows are omitted.
pub fn content_document(
    structure: &StructureModel,
    range: &Range<Data>,
    sheet_name: &str,
) -> SyncResult<Value> {
    let mut data = Mapping::new();
    data.insert(
        Value::String(sheet_name.to_string()),
        Value::Sequence(data_rows(structure, range)),
    );

    let mut root = Mapping::new();
    root.insert(Value::String("schema".to_string()), serde_yaml::to_value(structure)?);
    root.insert(Value::String("data".to_string()), Value::Mapping(data));
    Ok(Value::Mapping(root))
}

fn data_rows(structure: &StructureModel, range: &Range<Data>) -> Vec<Value> {
    let rows = used_rows(range);
    let mut out = Vec::new();
    // Data starts on the row after the 1-based header row
    for row in structure.header_row..rows {
        let mut entry = Mapping::new();
        for column in &structure.columns {
            if column.name.is_empty() {
                continue;
            }
            let cell = range.get_value((row, column.index as u32));
            if let Some(value) = cell.and_then(cell_to_yaml) {
                entry.insert(Value::String(column.name.clone()), value);
            }
        }
        if !entry.is_empty() {
            out.push(Value::Mapping(entry));
        }
    }
    out
}

fn cell_to_yaml(cell: &Data) -> Option<Value> {
    match cell {
        Data::Empty => None,
        Data::String(s) if s.trim().is_empty() => None,
        Data::String(s) => Some(Value::String(s.clone())),
        Data::Int(i) => Some(Value::Number(serde_yaml::Number::from(*i))),
        Data::Float(f) => {
            // Whole-number floats read back from Excel serials as integers
            if f.fract() == 0.0 && f.abs() < 1e10 {
                Some(Value::Number(serde_yaml::Number::from(*f as i64)))
            } else {
                Some(Value::Number(serde_yaml::Number::from(*f)))
            }
        }
        Data::Bool(b) => Some(Value::Bool(*b)),
        Data::DateTime(_) => {
            let rendered = cell
                .as_datetime()
                .map(|dt| {
                    if dt.time() == chrono::NaiveTime::MIN {
                        dt.date().to_string()
                    } else {
                        dt.to_string()
                    }
                })
                .unwrap_or_else(|| cell.to_string());
            Some(Value::String(rendered))
        }
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(Value::String(s.clone())),
        Data::Error(_) => Some(Value::String(cell.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{extract, SheetContext};

    fn context() -> SheetContext {
        SheetContext {
            sheet_name: "Data".to_string(),
            filename: "test.xlsx".to_string(),
            sheet_count: 1,
        }
    }

    fn sample_range() -> Range<Data> {
        let mut range: Range<Data> = Range::new((0, 0), (3, 1));
        range.set_value((0, 0), Data::String("Name".to_string()));
        range.set_value((0, 1), Data::String("Age".to_string()));
        range.set_value((1, 0), Data::String("Alice".to_string()));
        range.set_value((1, 1), Data::Float(30.0));
        range.set_value((2, 0), Data::String("Bob".to_string()));
        // Row 3 left fully blank
        range.set_value((3, 0), Data::Empty);
        range
    }

    #[test]
    fn test_document_has_schema_and_data() {
        let range = sample_range();
        let structure = extract(&range, 1, &context()).unwrap();

        let document = content_document(&structure, &range, "Data").unwrap();

        let schema = &document["schema"];
        assert_eq!(schema["header_row"], Value::from(1));
        assert_eq!(schema["columns"][0]["name"], Value::from("Name"));

        let rows = document["data"]["Data"].as_sequence().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["Name"], Value::from("Alice"));
        assert_eq!(rows[0]["Age"], Value::from(30));
        // Bob's blank Age cell is omitted from the row map
        assert_eq!(rows[1]["Name"], Value::from("Bob"));
        assert!(rows[1].as_mapping().unwrap().get("Age").is_none());
    }

    #[test]
    fn test_rows_start_after_custom_header_row() {
        let mut range: Range<Data> = Range::new((0, 0), (3, 0));
        range.set_value((0, 0), Data::String("Junk".to_string()));
        range.set_value((2, 0), Data::String("Name".to_string()));
        range.set_value((3, 0), Data::String("Alice".to_string()));

        let structure = extract(&range, 3, &context()).unwrap();
        let document = content_document(&structure, &range, "Data").unwrap();

        let rows = document["data"]["Data"].as_sequence().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["Name"], Value::from("Alice"));
    }

    #[test]
    fn test_cell_rendering() {
        assert_eq!(
            cell_to_yaml(&Data::Bool(true)),
            Some(Value::Bool(true))
        );
        assert_eq!(
            cell_to_yaml(&Data::Float(1.5)),
            Some(Value::Number(serde_yaml::Number::from(1.5)))
        );
        assert_eq!(cell_to_yaml(&Data::Empty), None);
        assert_eq!(cell_to_yaml(&Data::String("  ".to_string())), None);
        assert_eq!(
            cell_to_yaml(&Data::DateTimeIso("2023-01-01".to_string())),
            Some(Value::String("2023-01-01".to_string()))
        );
    }
}
