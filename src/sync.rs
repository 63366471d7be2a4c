//! The `SheetSync` facade: one open workbook, one selected sheet, one
//! header-row default, and the operations composed on top of them.

use crate::core::{comparator, extractor, validator, ComparisonResult};
use crate::dump;
use crate::error::{SyncError, SyncResult};
use crate::excel::WorkbookFile;
use crate::store;
use crate::types::StructureModel;
use std::path::Path;
use tracing::debug;

/// Manages one Excel workbook with a predefined structure: extraction,
/// validation, persistence and comparison.
///
/// The workbook handle is acquired on construction and released when the
/// value drops, on every exit path. The header-row default starts at 1,
/// can be set at construction, and is adopted from a loaded structure by
/// [`SheetSync::load_structure`]; a per-call `header_row` override applies
/// to that call only.
#[derive(Debug)]
pub struct SheetSync {
    workbook: WorkbookFile,
    sheet: String,
    header_row: u32,
}

impl SheetSync {
    /// Open a workbook with the first sheet selected and header row 1
    pub fn open<P: AsRef<Path>>(path: P) -> SyncResult<Self> {
        Self::open_with_header_row(path, 1)
    }

    pub fn open_with_header_row<P: AsRef<Path>>(path: P, header_row: u32) -> SyncResult<Self> {
        let workbook = WorkbookFile::open(path)?;
        let sheet = workbook.first_sheet()?;
        Ok(Self {
            workbook,
            sheet,
            header_row,
        })
    }

    /// Select another sheet of the same workbook by name
    pub fn select_sheet(&mut self, name: &str) -> SyncResult<()> {
        if !self.workbook.sheet_names().iter().any(|s| s == name) {
            return Err(SyncError::Excel(format!(
                "workbook has no sheet named '{}'",
                name
            )));
        }
        self.sheet = name.to_string();
        Ok(())
    }

    pub fn sheet(&self) -> &str {
        &self.sheet
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    /// The current header-row default
    pub fn header_row(&self) -> u32 {
        self.header_row
    }

    fn resolve(&self, header_row: Option<u32>) -> u32 {
        header_row.unwrap_or(self.header_row)
    }

    fn context(&self) -> extractor::SheetContext {
        extractor::SheetContext {
            sheet_name: self.sheet.clone(),
            filename: self.workbook.file_name(),
            sheet_count: self.workbook.sheet_count(),
        }
    }

    /// Extract the structure of the selected sheet
    pub fn extract_structure(&mut self, header_row: Option<u32>) -> SyncResult<StructureModel> {
        let header_row = self.resolve(header_row);
        let context = self.context();
        let range = self.workbook.range(&self.sheet)?;
        extractor::extract(&range, header_row, &context)
    }

    /// Validate the live structure against a JSON Schema. With no schema
    /// the current structure is taken as authoritative and the result is
    /// trivially valid.
    pub fn validate_structure(
        &mut self,
        schema: Option<&serde_json::Value>,
        header_row: Option<u32>,
    ) -> SyncResult<(bool, Vec<String>)> {
        let structure = self.extract_structure(header_row)?;
        match schema {
            Some(schema) => validator::validate(&structure, schema),
            None => Ok((true, Vec::new())),
        }
    }

    /// Extract and persist the structure (format by target extension)
    pub fn export_structure(&mut self, target: &Path, header_row: Option<u32>) -> SyncResult<()> {
        let structure = self.extract_structure(header_row)?;
        store::save(&structure, target)
    }

    /// Compare the live structure against a previously stored one.
    ///
    /// Extraction uses this facade's header-row default (or the per-call
    /// override); use [`SheetSync::load_structure`] first to adopt the
    /// stored structure's header row.
    pub fn compare_structure(
        &mut self,
        stored: &Path,
        header_row: Option<u32>,
    ) -> SyncResult<ComparisonResult> {
        let expected = store::load(stored)?;
        let actual = self.extract_structure(header_row)?;
        Ok(comparator::compare(&expected, &actual))
    }

    /// Dump the selected sheet's content as YAML annotated with its
    /// structure
    pub fn export_to_yaml(&mut self, target: &Path, header_row: Option<u32>) -> SyncResult<()> {
        let structure = self.extract_structure(header_row)?;
        let range = self.workbook.range(&self.sheet)?;
        dump::export_yaml(&structure, &range, &self.sheet, target)
    }

    /// Load a stored structure and adopt its header row as this facade's
    /// new default
    pub fn load_structure(&mut self, source: &Path) -> SyncResult<StructureModel> {
        let structure = store::load(source)?;
        debug!(
            from = self.header_row,
            to = structure.header_row,
            "adopting header row from loaded structure"
        );
        self.header_row = structure.header_row;
        Ok(structure)
    }
}
