use thiserror::Error;

pub type Result<T> = std::result::Result<T, LochistError>;

#[derive(Error, Debug)]
pub enum LochistError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("Cache error: {0}")]
    Cache(String),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid record at row {row}: {message}")]
    Record { row: usize, message: String },
    #[error("Missing column: {0}")]
    MissingColumn(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Projects error: {0}")]
    Projects(String),
    #[error("Other: {0}")]
    Other(String),
}

impl LochistError {
    pub fn record(row: usize, message: impl Into<String>) -> Self {
        LochistError::Record {
            row,
            message: message.into(),
        }
    }
}
