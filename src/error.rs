use thiserror::Error;

#[derive(Error, Debug)]
pub enum ItemiqError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown transaction: {0}")]
    UnknownTransaction(i64),

    #[error("Transaction {0} has no itemized breakdown")]
    NoItems(i64),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, ItemiqError>;
