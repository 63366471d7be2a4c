//! Structure extraction: header row + column span + type inference

use crate::error::{SyncError, SyncResult};
use crate::excel::{used_columns, used_rows};
use crate::types::{classify, is_blank, metadata, CellType, ColumnDefinition, StructureModel};
use calamine::{Data, Range};
use std::collections::BTreeMap;
use tracing::debug;

/// Maximum number of data rows sampled per column for type inference and for
/// the column span scan. Keeps extraction bounded on very large sheets.
pub const TYPE_SAMPLE_ROWS: u32 = 256;

/// File-level properties threaded into extraction explicitly, so the
/// resulting model is complete at construction.
#[derive(Debug, Clone)]
pub struct SheetContext {
    pub sheet_name: String,
    pub filename: String,
    pub sheet_count: usize,
}

/// Extract the structure of one sheet at the given 1-based header row.
///
/// A sheet with no used cells extracts to a model with empty `columns`.
/// On a non-blank sheet, a header row of 0 or beyond the used range fails
/// with [`SyncError::InvalidHeaderRow`].
pub fn extract(
    range: &Range<Data>,
    header_row: u32,
    context: &SheetContext,
) -> SyncResult<StructureModel> {
    let rows = used_rows(range);

    if rows == 0 {
        debug!(sheet = %context.sheet_name, "extracting blank sheet");
        return Ok(blank_model(header_row.max(1), context));
    }

    if header_row < 1 || header_row > rows {
        return Err(SyncError::InvalidHeaderRow {
            header_row,
            used_rows: rows,
        });
    }

    // 0-based physical row of the headers; data is sampled beneath it.
    let header_idx = header_row - 1;
    let last_row = rows - 1;
    let sample_end = last_row.min(header_idx + TYPE_SAMPLE_ROWS);

    let span = column_span(range, header_idx, sample_end);
    let Some(last_col) = span else {
        // Used range exists but every sampled cell is blank
        return Ok(blank_model(header_row, context));
    };

    let mut columns = Vec::with_capacity(last_col as usize + 1);
    for col in 0..=last_col {
        let name = match range.get_value((header_idx, col)) {
            Some(Data::Empty) | None => String::new(),
            Some(cell) => cell.to_string(),
        };
        let inferred_type = infer_column_type(range, col, header_idx + 1, sample_end);
        columns.push(ColumnDefinition::new(col as usize, name, inferred_type));
    }

    debug!(
        sheet = %context.sheet_name,
        header_row,
        columns = columns.len(),
        "extracted structure"
    );

    Ok(StructureModel {
        header_row,
        columns,
        sheet_metadata: sheet_metadata(context, rows, last_col + 1),
    })
}

/// Highest column index holding a non-blank header or data cell among the
/// sampled rows, or `None` when all sampled cells are blank. Trailing
/// fully-blank columns fall outside the span; leading blank ones stay in,
/// keeping indices aligned with physical column order.
fn column_span(range: &Range<Data>, header_idx: u32, sample_end: u32) -> Option<u32> {
    let cols = used_columns(range);
    let mut span = None;
    for col in 0..cols {
        let mut has_value = !is_blank(range.get_value((header_idx, col)));
        if !has_value {
            for row in header_idx + 1..=sample_end {
                if !is_blank(range.get_value((row, col))) {
                    has_value = true;
                    break;
                }
            }
        }
        if has_value {
            span = Some(col);
        }
    }
    span
}

/// Infer a column's type from its sampled data cells.
///
/// Blank cells never count toward disagreement: a column is `Mixed` only
/// when two or more distinct non-blank types appear, and `Empty` when no
/// non-blank data cell exists at all.
fn infer_column_type(range: &Range<Data>, col: u32, first_data_row: u32, sample_end: u32) -> CellType {
    let mut seen: Option<CellType> = None;
    for row in first_data_row..=sample_end {
        let cell = match range.get_value((row, col)) {
            Some(c) => c,
            None => continue,
        };
        let tag = classify(cell);
        if tag == CellType::Empty {
            continue;
        }
        match seen {
            None => seen = Some(tag),
            Some(previous) if previous == tag => {}
            Some(_) => return CellType::Mixed,
        }
    }
    seen.unwrap_or(CellType::Empty)
}

fn blank_model(header_row: u32, context: &SheetContext) -> StructureModel {
    StructureModel {
        header_row,
        columns: Vec::new(),
        sheet_metadata: sheet_metadata(context, 0, 0),
    }
}

fn sheet_metadata(
    context: &SheetContext,
    rows: u32,
    columns_count: u32,
) -> BTreeMap<String, serde_json::Value> {
    let mut meta = BTreeMap::new();
    meta.insert(
        metadata::FILENAME.to_string(),
        serde_json::Value::from(context.filename.clone()),
    );
    meta.insert(
        metadata::SHEET_NAME.to_string(),
        serde_json::Value::from(context.sheet_name.clone()),
    );
    meta.insert(
        metadata::SHEET_COUNT.to_string(),
        serde_json::Value::from(context.sheet_count),
    );
    meta.insert(metadata::ROWS.to_string(), serde_json::Value::from(rows));
    meta.insert(
        metadata::COLUMNS_COUNT.to_string(),
        serde_json::Value::from(columns_count),
    );
    meta
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn context() -> SheetContext {
        SheetContext {
            sheet_name: "Sheet1".to_string(),
            filename: "test.xlsx".to_string(),
            sheet_count: 1,
        }
    }

    fn string(s: &str) -> Data {
        Data::String(s.to_string())
    }

    #[test]
    fn test_extract_name_age() {
        let mut range: Range<Data> = Range::new((0, 0), (1, 1));
        range.set_value((0, 0), string("Name"));
        range.set_value((0, 1), string("Age"));
        range.set_value((1, 0), string("Alice"));
        range.set_value((1, 1), Data::Float(30.0));

        let model = extract(&range, 1, &context()).unwrap();

        assert_eq!(model.header_row, 1);
        assert_eq!(
            model.columns,
            vec![
                ColumnDefinition::new(0, "Name", CellType::String),
                ColumnDefinition::new(1, "Age", CellType::Number),
            ]
        );
    }

    #[test]
    fn test_extract_header_row_three() {
        let mut range: Range<Data> = Range::new((0, 0), (3, 1));
        range.set_value((0, 0), string("Report"));
        range.set_value((2, 0), string("Name"));
        range.set_value((2, 1), string("Age"));
        range.set_value((3, 0), string("Alice"));
        range.set_value((3, 1), Data::Float(30.0));

        let model = extract(&range, 3, &context()).unwrap();

        assert_eq!(model.header_row, 3);
        assert_eq!(model.columns[0].name, "Name");
        assert_eq!(model.columns[1].name, "Age");
        assert_eq!(model.columns[1].inferred_type, CellType::Number);
    }

    #[test]
    fn test_extract_header_row_out_of_range() {
        let mut range: Range<Data> = Range::new((0, 0), (4, 0));
        for row in 0..5 {
            range.set_value((row, 0), string("x"));
        }

        let err = extract(&range, 10, &context()).unwrap_err();
        assert!(matches!(
            err,
            crate::error::SyncError::InvalidHeaderRow {
                header_row: 10,
                used_rows: 5
            }
        ));
    }

    #[test]
    fn test_extract_header_row_zero_is_invalid() {
        let mut range: Range<Data> = Range::new((0, 0), (0, 0));
        range.set_value((0, 0), string("Name"));

        let err = extract(&range, 0, &context()).unwrap_err();
        assert!(matches!(
            err,
            crate::error::SyncError::InvalidHeaderRow { header_row: 0, .. }
        ));
    }

    #[test]
    fn test_blank_sheet_yields_empty_columns() {
        let range: Range<Data> = Range::new((0, 0), (2, 2));

        let model = extract(&range, 1, &context()).unwrap();
        assert!(model.columns.is_empty());
        assert!(model.check_invariants().is_ok());
    }

    #[test]
    fn test_trailing_blank_columns_excluded() {
        // Column 2 has neither header nor data; span stops at column 1
        let mut range: Range<Data> = Range::new((0, 0), (1, 2));
        range.set_value((0, 0), string("A"));
        range.set_value((0, 1), string("B"));
        range.set_value((1, 0), Data::Float(1.0));

        let model = extract(&range, 1, &context()).unwrap();
        assert_eq!(model.columns.len(), 2);
    }

    #[test]
    fn test_headerless_data_column_included() {
        // Column 1 has data but a blank header: kept with empty name
        let mut range: Range<Data> = Range::new((0, 0), (1, 1));
        range.set_value((0, 0), string("A"));
        range.set_value((1, 0), string("x"));
        range.set_value((1, 1), Data::Float(2.0));

        let model = extract(&range, 1, &context()).unwrap();
        assert_eq!(model.columns.len(), 2);
        assert_eq!(model.columns[1].name, "");
        assert_eq!(model.columns[1].inferred_type, CellType::Number);
    }

    #[test]
    fn test_column_with_no_data_is_empty_type() {
        let mut range: Range<Data> = Range::new((0, 0), (1, 1));
        range.set_value((0, 0), string("A"));
        range.set_value((0, 1), string("B"));
        range.set_value((1, 0), Data::Float(1.0));

        let model = extract(&range, 1, &context()).unwrap();
        assert_eq!(model.columns[1].inferred_type, CellType::Empty);
    }

    #[test]
    fn test_mixed_requires_two_nonblank_types() {
        let mut range: Range<Data> = Range::new((0, 0), (3, 1));
        range.set_value((0, 0), string("A"));
        range.set_value((0, 1), string("B"));
        // Column 0: number, blank, number → number (blanks don't disagree)
        range.set_value((1, 0), Data::Float(1.0));
        range.set_value((3, 0), Data::Float(2.0));
        // Column 1: number then string → mixed
        range.set_value((1, 1), Data::Float(1.0));
        range.set_value((2, 1), string("two"));

        let model = extract(&range, 1, &context()).unwrap();
        assert_eq!(model.columns[0].inferred_type, CellType::Number);
        assert_eq!(model.columns[1].inferred_type, CellType::Mixed);
    }

    #[test]
    fn test_metadata_recorded() {
        let mut range: Range<Data> = Range::new((0, 0), (2, 1));
        range.set_value((0, 0), string("A"));
        range.set_value((0, 1), string("B"));
        range.set_value((1, 0), Data::Float(1.0));
        range.set_value((2, 0), Data::Float(2.0));

        let model = extract(&range, 1, &context()).unwrap();
        assert_eq!(
            model.sheet_metadata.get(metadata::ROWS),
            Some(&serde_json::Value::from(3u32))
        );
        assert_eq!(
            model.sheet_metadata.get(metadata::SHEET_NAME),
            Some(&serde_json::Value::from("Sheet1"))
        );
    }
}
