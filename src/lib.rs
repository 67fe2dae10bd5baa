pub mod config;
pub mod entities;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod services;

pub use config::UploaderConfig;
pub use error::UploadError;
pub use models::{FileFailure, FolderReport, PersistenceOutcome, RunSummary, UploadRecord};
pub use services::folder_upload::FolderUploadService;
