//! Structure validation against declarative JSON Schemas
//!
//! Two directions: check an extracted structure against a caller-supplied
//! schema, and derive a schema *from* a structure that a sheet's data rows
//! can be validated against.

use crate::error::{SyncError, SyncResult};
use crate::types::{CellType, StructureModel};
use jsonschema::JSONSchema;
use serde_json::{json, Value};

/// Validate a structure against a caller-supplied JSON Schema.
///
/// The structure is validated in its portable document form
/// (`header_row` / `columns` / `file_properties`), so schemas are written
/// over the same shape that `save` persists. A malformed schema fails with
/// [`SyncError::Schema`]; validation findings come back as the
/// collaborator's messages, order preserved.
pub fn validate(structure: &StructureModel, schema: &Value) -> SyncResult<(bool, Vec<String>)> {
    let document = structure_document(structure)?;
    validate_document(&document, schema)
}

/// The structure's portable JSON document, as persisted by the store
pub fn structure_document(structure: &StructureModel) -> SyncResult<Value> {
    Ok(serde_json::to_value(structure)?)
}

/// Derive a draft-07 JSON Schema describing the sheet's data rows: one
/// object per row, one property per named column, types constrained by the
/// column's inferred type. Blank-named columns carry no usable key and are
/// left out.
pub fn data_schema(structure: &StructureModel) -> Value {
    let mut properties = serde_json::Map::new();
    for column in &structure.columns {
        if column.name.is_empty() {
            continue;
        }
        properties.insert(
            column.name.clone(),
            json!({
                "type": json_schema_type(column.inferred_type),
                "description": format!("Column {} - {}", column.index, column.name),
            }),
        );
    }

    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "Sheet Data Schema",
        "type": "array",
        "items": {
            "type": "object",
            "properties": properties,
            "additionalProperties": false,
        },
    })
}

/// Validate a JSON array of row objects against the structure's derived
/// data schema
pub fn validate_rows(structure: &StructureModel, rows: &Value) -> SyncResult<(bool, Vec<String>)> {
    let schema = data_schema(structure);
    validate_document(rows, &schema)
}

fn validate_document(document: &Value, schema: &Value) -> SyncResult<(bool, Vec<String>)> {
    let compiled =
        JSONSchema::compile(schema).map_err(|e| SyncError::Schema(e.to_string()))?;

    let result = match compiled.validate(document) {
        Ok(()) => Ok((true, Vec::new())),
        Err(errors) => {
            let messages: Vec<String> = errors.map(|e| e.to_string()).collect();
            Ok((false, messages))
        }
    };
    result
}

fn json_schema_type(cell_type: CellType) -> Value {
    match cell_type {
        CellType::String => json!("string"),
        CellType::Number => json!("number"),
        CellType::Date => json!("string"),
        CellType::Boolean => json!("boolean"),
        CellType::Empty => json!(["null", "string"]),
        CellType::Mixed => json!(["string", "number", "boolean", "null"]),
    }
}
