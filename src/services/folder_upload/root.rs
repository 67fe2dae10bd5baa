use futures::future::try_join_all;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info};

use super::FolderUploadService;
use crate::error::UploadError;
use crate::models::{PersistenceOutcome, RunSummary};

impl FolderUploadService {
    /// Upload the files of every immediate subdirectory of `root_folder`, then
    /// persist all resulting records in one batch.
    ///
    /// Only discovery failures are returned as errors; they abort the run before
    /// anything is persisted. A failed batch insert is logged and reported in the
    /// summary, never retried.
    pub async fn upload_folders(&self, root_folder: &Path) -> Result<RunSummary, UploadError> {
        let subfolders = discover_subfolders(root_folder).await?;
        info!(
            "📂 Found {} subfolder(s) under {}",
            subfolders.len(),
            root_folder.display()
        );

        let mut records = Vec::new();
        let mut failures = Vec::new();
        for folder_path in &subfolders {
            let report = self.process_folder(folder_path).await;
            records.extend(report.records);
            failures.extend(report.failures);
        }

        let persistence = if records.is_empty() {
            PersistenceOutcome::Skipped
        } else {
            match self.records.insert_batch(&records).await {
                Ok(()) => {
                    info!(
                        "✅ Successfully inserted {} record(s) into the database",
                        records.len()
                    );
                    PersistenceOutcome::Persisted {
                        count: records.len(),
                    }
                }
                Err(e) => {
                    error!(error = %e, "❌ Error inserting records into the database");
                    PersistenceOutcome::Failed {
                        reason: e.to_string(),
                    }
                }
            }
        };

        Ok(RunSummary {
            folders_processed: subfolders.len(),
            records,
            failures,
            persistence,
        })
    }
}

/// Immediate subdirectories of `root_folder`, in listing order.
pub async fn discover_subfolders(root_folder: &Path) -> Result<Vec<PathBuf>, UploadError> {
    let listing_error = |source: std::io::Error| UploadError::Discovery {
        path: root_folder.to_path_buf(),
        source,
    };

    let mut dir = fs::read_dir(root_folder).await.map_err(listing_error)?;
    let mut paths = Vec::new();
    while let Some(entry) = dir.next_entry().await.map_err(listing_error)? {
        paths.push(entry.path());
    }

    classify_entries(&paths).await
}

/// Keep the directories among `paths`, preserving their order.
///
/// Every entry is stat'd concurrently without following symlinks; the first
/// failing stat aborts the whole pass.
pub async fn classify_entries(paths: &[PathBuf]) -> Result<Vec<PathBuf>, UploadError> {
    let is_dir = try_join_all(paths.iter().map(|path| async move {
        fs::symlink_metadata(path)
            .await
            .map(|meta| meta.is_dir())
            .map_err(|source| UploadError::Discovery {
                path: path.clone(),
                source,
            })
    }))
    .await?;

    Ok(paths
        .iter()
        .zip(is_dir)
        .filter_map(|(path, is_dir)| is_dir.then(|| path.clone()))
        .collect())
}
