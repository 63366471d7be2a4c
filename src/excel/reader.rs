use crate::error::{SyncError, SyncResult};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::io;
use std::path::{Path, PathBuf};

/// An open workbook file. Holds the underlying zip reader for its whole
/// lifetime; dropped when the owner goes out of scope.
pub struct WorkbookFile {
    path: PathBuf,
    workbook: Xlsx<io::BufReader<std::fs::File>>,
}

impl std::fmt::Debug for WorkbookFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkbookFile")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl WorkbookFile {
    /// Open an .xlsx workbook for reading
    pub fn open<P: AsRef<Path>>(path: P) -> SyncResult<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(SyncError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Excel file not found: {}", path.display()),
            )));
        }

        let workbook: Xlsx<_> = open_workbook(&path)
            .map_err(|e| SyncError::Excel(format!("Failed to open Excel file: {}", e)))?;

        Ok(Self { path, workbook })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name component, for metadata
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }

    pub fn sheet_count(&self) -> usize {
        self.workbook.sheet_names().len()
    }

    /// Name of the first sheet in workbook order
    pub fn first_sheet(&self) -> SyncResult<String> {
        self.workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| SyncError::Excel("workbook contains no sheets".to_string()))
    }

    /// Cell range of one sheet, by name
    pub fn range(&mut self, sheet: &str) -> SyncResult<Range<Data>> {
        self.workbook
            .worksheet_range(sheet)
            .map_err(|e| SyncError::Excel(format!("Failed to read sheet '{}': {}", sheet, e)))
    }
}

/// Number of used rows in a range, counted from physical row 1
pub fn used_rows(range: &Range<Data>) -> u32 {
    range.end().map_or(0, |(row, _)| row + 1)
}

/// Number of used columns in a range, counted from physical column 0
pub fn used_columns(range: &Range<Data>) -> u32 {
    range.end().map_or(0, |(_, col)| col + 1)
}
