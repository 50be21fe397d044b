//! Error types
//!
//! Only level loading is fatal. Save files are best-effort: reading a
//! missing or broken save is "no save", so only writing can fail.

use thiserror::Error;

/// Errors that can occur when loading a level
#[derive(Debug, Error)]
pub enum LevelError {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON parsing failed
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// Tile dictionary key is not of the form "x;y"
    #[error("Invalid tile key: {0}")]
    InvalidTileKey(String),
    /// Tile size must be positive
    #[error("Invalid tile size: {0}")]
    InvalidTileSize(i64),
}

/// Errors that can occur when writing a session snapshot
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
