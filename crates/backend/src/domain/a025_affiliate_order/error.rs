use thiserror::Error;

/// Failures of the affiliate commission dashboard
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// A required column is absent from the upload, or a requested
    /// dimension does not exist
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// `row` is the 1-based data row, header excluded
    #[error("Malformed commission at row {row}: '{value}'")]
    MalformedCommission { row: usize, value: String },

    #[error("Invalid CSV: {0}")]
    InvalidCsv(String),

    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    #[error("Upload not found: {0}")]
    UploadNotFound(String),
}
