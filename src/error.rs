use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid record at row {row}: {source}")]
    InvalidRecord {
        row: usize,
        #[source]
        source: validator::ValidationErrors,
    },

    #[error("Required column '{column}' missing from {context}")]
    MissingColumn { column: String, context: String },

    #[error("Invalid coordinate at row {row}, column '{column}': '{value}'")]
    InvalidCoordinate {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Invalid radius at row {row}: '{value}'")]
    InvalidRadius { row: usize, value: String },

    #[error("Projection error: {0}")]
    Projection(String),

    #[error("Unknown text encoding: {0}")]
    UnknownEncoding(String),

    #[error("Overlay {path} could not be loaded: {source}")]
    Overlay {
        path: PathBuf,
        #[source]
        source: Box<ProcessingError>,
    },

    #[error("Missing required data: {0}")]
    MissingData(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}

impl ProcessingError {
    pub fn missing_column(column: &str, context: &str) -> Self {
        ProcessingError::MissingColumn {
            column: column.to_string(),
            context: context.to_string(),
        }
    }
}
