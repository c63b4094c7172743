// errors.rs
use std::fmt;

/// Errors originating from the SQLite-backed result cache.
#[derive(Debug)]
pub enum CacheError {
    DbError(String),
    InternalError,
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::DbError(msg) => write!(f, "Cache Error: {msg}"),
            CacheError::InternalError => write!(f, "Internal Cache Error"),
        }
    }
}

impl std::error::Error for CacheError {}

/// Errors from the final CSV write.
#[derive(Debug)]
pub enum ExportError {
    CsvError(String),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::CsvError(msg) => write!(f, "CSV Error: {msg}"),
        }
    }
}

impl std::error::Error for ExportError {}
