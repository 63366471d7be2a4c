//! Persistence of the portable structure representation
//!
//! JSON and YAML serialize the identical logical shape
//! (`header_row` / `columns` / `file_properties`); the format is chosen by
//! file extension and never changes semantics. Loading re-checks the model
//! invariants, so a stored structure that parses but violates them fails
//! with [`SyncError::MalformedStructure`].

use crate::error::{SyncError, SyncResult};
use crate::types::StructureModel;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureFormat {
    Json,
    Yaml,
}

/// Format implied by a file extension: `.yaml`/`.yml` → YAML, anything
/// else → JSON
pub fn detect_format(path: &Path) -> StructureFormat {
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => StructureFormat::Yaml,
        _ => StructureFormat::Json,
    }
}

/// Serialize a structure to `target`, format chosen by extension
pub fn save(structure: &StructureModel, target: &Path) -> SyncResult<()> {
    save_as(structure, target, detect_format(target))
}

pub fn save_as(
    structure: &StructureModel,
    target: &Path,
    format: StructureFormat,
) -> SyncResult<()> {
    let content = match format {
        StructureFormat::Json => serde_json::to_string_pretty(structure)?,
        StructureFormat::Yaml => serde_yaml::to_string(structure)?,
    };
    fs::write(target, content)?;
    debug!(path = %target.display(), ?format, "saved structure");
    Ok(())
}

/// Load a stored structure and re-check its invariants
pub fn load(source: &Path) -> SyncResult<StructureModel> {
    if !source.exists() {
        return Err(SyncError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("Structure file not found: {}", source.display()),
        )));
    }

    let content = fs::read_to_string(source)?;
    let structure: StructureModel = match detect_format(source) {
        StructureFormat::Json => serde_json::from_str(&content)
            .map_err(|e| SyncError::MalformedStructure(e.to_string()))?,
        StructureFormat::Yaml => serde_yaml::from_str(&content)
            .map_err(|e| SyncError::MalformedStructure(e.to_string()))?,
    };

    structure
        .check_invariants()
        .map_err(SyncError::MalformedStructure)?;

    debug!(source = %source.display(), columns = structure.columns.len(), "loaded structure");
    Ok(structure)
}
