use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhotocullError {
    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to copy {source_path} to {destination}: {error}")]
    Copy {
        source_path: PathBuf,
        destination: PathBuf,
        #[source]
        error: std::io::Error,
    },

    // Filesystem errors
    #[error("Directory walker error: {0}")]
    Walkdir(#[from] walkdir::Error),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    // Metadata errors
    #[error("Exiftool error: {0}")]
    Exiftool(String),

    #[error("Date parsing error: {0}")]
    InvalidDateFormat(String),

    #[error("Failed to extract metadata from {path}: {reason}")]
    MetadataExtraction { path: PathBuf, reason: String },

    // Generic errors
    #[error("Argument error: {0}")]
    Argument(String),
}

/// Result type for photocull operations.
pub type Result<T> = std::result::Result<T, PhotocullError>;
