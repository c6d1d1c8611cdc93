use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DircmpError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot open folder {path}: {source}")]
    FolderOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Report error: {0}")]
    Report(String),
}

pub type Result<T> = std::result::Result<T, DircmpError>;
