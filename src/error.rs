use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to store object {key}: {source}")]
    Store {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Database error: {0}")]
    Persistence(#[from] sea_orm::DbErr),

    #[error("Failed to scan {}: {source}", path.display())]
    Discovery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}
