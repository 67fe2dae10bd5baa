use crate::services::{records::RecordStore, storage::StorageService};
use std::sync::Arc;

pub mod folder;
pub mod object;
pub mod root;

/// Uploads the files of a root folder's subfolders and records where they landed.
///
/// Both collaborators are injected so runs can be pointed at fakes.
pub struct FolderUploadService {
    storage: Arc<dyn StorageService>,
    records: Arc<dyn RecordStore>,
}

impl FolderUploadService {
    pub fn new(storage: Arc<dyn StorageService>, records: Arc<dyn RecordStore>) -> Self {
        Self { storage, records }
    }
}

/// Object key for a file: `{folder}/{name}`, used verbatim.
pub fn object_key(destination_folder: &str, destination_name: &str) -> String {
    format!("{}/{}", destination_folder, destination_name)
}
