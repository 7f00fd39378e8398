use thiserror::Error;

#[derive(Error, Debug)]
pub enum JournalError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("CSV error: {0}")]
    CsvError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid input: {field} - {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Trade not found: {0}")]
    TradeNotFound(String),

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

impl JournalError {
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        JournalError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<rusqlite::Error> for JournalError {
    fn from(err: rusqlite::Error) -> Self {
        JournalError::DatabaseError(err.to_string())
    }
}

impl From<serde_json::Error> for JournalError {
    fn from(err: serde_json::Error) -> Self {
        JournalError::SerializationError(err.to_string())
    }
}

impl From<csv::Error> for JournalError {
    fn from(err: csv::Error) -> Self {
        JournalError::CsvError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, JournalError>;
