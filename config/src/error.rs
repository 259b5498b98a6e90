//! Error types for package file operations

use std::path::PathBuf;
use thiserror::Error;

/// Package file errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot find {0}")]
    NotFound(PathBuf),

    #[error("Unknown file type for {0}")]
    InvalidLayout(PathBuf),

    #[error("Unable to write to {path}, are you root? ({source})")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unable to create file {path}, are you root? ({source})")]
    FileCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unable to create directory {path}, are you root? ({source})")]
    DirectoryCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to replace {path}, are you root? ({source})")]
    Swap {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{atom} is already {kind}ed.")]
    AlreadyMasked { atom: String, kind: String },

    #[error("{atom} is not {kind}ed.")]
    NotMasked { atom: String, kind: String },

    #[error("Invalid package atom: {0}")]
    InvalidAtom(String),

    #[error("Invalid package file type: {0}")]
    InvalidKind(String),

    #[error("Invalid package file style: {0}")]
    InvalidStyle(String),
}

/// Result type alias for package file operations
pub type Result<T> = std::result::Result<T, ConfigError>;
