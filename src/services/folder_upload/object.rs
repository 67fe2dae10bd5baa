use std::path::Path;
use tokio::fs;

use super::{FolderUploadService, object_key};
use crate::error::UploadError;

impl FolderUploadService {
    /// Read `local_path` into memory and store it under `{destination_folder}/{destination_name}`.
    ///
    /// Returns the location reported by the store. No retries.
    pub async fn upload_file(
        &self,
        local_path: &Path,
        destination_folder: &str,
        destination_name: &str,
    ) -> Result<String, UploadError> {
        let data = fs::read(local_path)
            .await
            .map_err(|source| UploadError::Io {
                path: local_path.to_path_buf(),
                source,
            })?;

        let key = object_key(destination_folder, destination_name);
        let stored = self.storage.upload_file(&key, data).await;
        stored.map_err(|source| UploadError::Store { key, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UploadRecord;
    use crate::services::records::RecordStore;
    use crate::services::storage::StorageService;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct MemoryStorage {
        objects: Mutex<HashMap<String, Vec<u8>>>,
        offline: bool,
    }

    #[async_trait]
    impl StorageService for MemoryStorage {
        async fn upload_file(&self, key: &str, data: Vec<u8>) -> anyhow::Result<String> {
            if self.offline {
                return Err(anyhow::anyhow!("connection refused"));
            }
            self.objects.lock().unwrap().insert(key.to_string(), data);
            Ok(format!("mem://bucket/{}", key))
        }
    }

    struct NoRecords;

    #[async_trait]
    impl RecordStore for NoRecords {
        async fn insert_batch(&self, _records: &[UploadRecord]) -> Result<(), UploadError> {
            Ok(())
        }
    }

    fn service(storage: Arc<MemoryStorage>) -> FolderUploadService {
        FolderUploadService::new(storage, Arc::new(NoRecords))
    }

    #[tokio::test]
    async fn test_upload_reads_whole_file_under_composite_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.png");
        std::fs::write(&path, b"png-bytes").unwrap();

        let storage = Arc::new(MemoryStorage::default());
        let location = service(storage.clone())
            .upload_file(&path, "images", "a.png")
            .await
            .unwrap();

        assert_eq!(location, "mem://bucket/images/a.png");
        let objects = storage.objects.lock().unwrap();
        assert_eq!(objects.get("images/a.png").map(Vec::as_slice), Some(&b"png-bytes"[..]));
    }

    #[tokio::test]
    async fn test_key_is_not_sanitized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weird name.txt");
        std::fs::write(&path, b"x").unwrap();

        let storage = Arc::new(MemoryStorage::default());
        service(storage.clone())
            .upload_file(&path, "my folder", "weird name.txt")
            .await
            .unwrap();

        assert!(storage.objects.lock().unwrap().contains_key("my folder/weird name.txt"));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(MemoryStorage::default());

        let err = service(storage.clone())
            .upload_file(&dir.path().join("missing.bin"), "docs", "missing.bin")
            .await
            .unwrap_err();

        assert!(matches!(err, UploadError::Io { .. }));
        assert!(storage.objects.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();

        let err = service(Arc::new(MemoryStorage::default()))
            .upload_file(&dir.path().join("nested"), "docs", "nested")
            .await
            .unwrap_err();

        assert!(matches!(err, UploadError::Io { .. }));
    }

    #[tokio::test]
    async fn test_store_failure_is_store_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        std::fs::write(&path, b"%PDF").unwrap();

        let storage = Arc::new(MemoryStorage {
            offline: true,
            ..MemoryStorage::default()
        });
        let err = service(storage)
            .upload_file(&path, "docs", "report.pdf")
            .await
            .unwrap_err();

        match err {
            UploadError::Store { key, .. } => assert_eq!(key, "docs/report.pdf"),
            other => panic!("expected store error, got {other:?}"),
        }
    }
}
