use thiserror::Error;

pub type SyncResult<T> = Result<T, SyncError>;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel error: {0}")]
    Excel(String),

    #[error("header row {header_row} is outside the sheet's used range ({used_rows} rows)")]
    InvalidHeaderRow { header_row: u32, used_rows: u32 },

    #[error("malformed structure: {0}")]
    MalformedStructure(String),

    #[error("schema error: {0}")]
    Schema(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
