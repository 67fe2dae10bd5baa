use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One successfully uploaded file, held in memory until the end-of-run batch insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadRecord {
    pub id: String,
    pub sub_folder_name: String,
    pub file_name: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

impl UploadRecord {
    pub fn new(id: String, sub_folder_name: &str, file_name: &str, location: String) -> Self {
        Self {
            id,
            sub_folder_name: sub_folder_name.to_string(),
            file_name: file_name.to_string(),
            location,
            created_at: Utc::now(),
        }
    }
}

/// Fresh identifier for a single upload attempt.
pub fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileFailure {
    pub sub_folder_name: String,
    pub file_name: String,
    pub reason: String,
}

/// Everything one subfolder produced: records in listing order, plus the entries that failed.
#[derive(Debug, Clone, Default)]
pub struct FolderReport {
    pub sub_folder_name: String,
    pub records: Vec<UploadRecord>,
    pub failures: Vec<FileFailure>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PersistenceOutcome {
    /// No records were produced, so the batch insert was never attempted
    Skipped,
    Persisted { count: usize },
    Failed { reason: String },
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub folders_processed: usize,
    pub records: Vec<UploadRecord>,
    pub failures: Vec<FileFailure>,
    pub persistence: PersistenceOutcome,
}
