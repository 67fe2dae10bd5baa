use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info};

use super::FolderUploadService;
use crate::models::{FileFailure, FolderReport, UploadRecord, new_record_id};

impl FolderUploadService {
    /// Upload every entry directly inside `folder_path`.
    ///
    /// Entries are not filtered by type; a nested directory fails at the read
    /// step and is reported like any other failed file. Never returns an error:
    /// failures are collected in the report next to the records.
    pub async fn process_folder(&self, folder_path: &Path) -> FolderReport {
        let sub_folder_name = folder_name(folder_path);
        let mut report = FolderReport {
            sub_folder_name: sub_folder_name.clone(),
            ..FolderReport::default()
        };

        let entries = match list_entries(folder_path).await {
            Ok(entries) => entries,
            Err(e) => {
                error!(folder = %sub_folder_name, error = %e, "Could not list subfolder");
                report.failures.push(FileFailure {
                    sub_folder_name: sub_folder_name.clone(),
                    file_name: sub_folder_name,
                    reason: e.to_string(),
                });
                return report;
            }
        };

        for (file_name, file_path) in entries {
            let id = new_record_id();

            match self.upload_file(&file_path, &sub_folder_name, &file_name).await {
                Ok(location) => {
                    info!(file = %file_name, location = %location, "Uploaded {} to {}", file_name, location);
                    report
                        .records
                        .push(UploadRecord::new(id, &sub_folder_name, &file_name, location));
                }
                Err(e) => {
                    error!(file = %file_name, error = %e, "Error uploading {}", file_name);
                    report.failures.push(FileFailure {
                        sub_folder_name: sub_folder_name.clone(),
                        file_name,
                        reason: e.to_string(),
                    });
                }
            }
        }

        report
    }
}

fn folder_name(folder_path: &Path) -> String {
    folder_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| folder_path.display().to_string())
}

/// Entry names and full paths in directory enumeration order.
async fn list_entries(folder_path: &Path) -> std::io::Result<Vec<(String, PathBuf)>> {
    let mut dir = fs::read_dir(folder_path).await?;
    let mut entries = Vec::new();
    while let Some(entry) = dir.next_entry().await? {
        entries.push((entry.file_name().to_string_lossy().into_owned(), entry.path()));
    }
    Ok(entries)
}
