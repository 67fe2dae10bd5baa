use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, TransactionTrait};

use crate::entities::{prelude::*, uploaded_files};
use crate::error::UploadError;
use crate::models::UploadRecord;

/// Batch persistence for upload records.
///
/// A batch either lands completely or not at all; callers get one aggregate error.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn insert_batch(&self, records: &[UploadRecord]) -> Result<(), UploadError>;
}

pub struct SeaOrmRecordStore {
    db: DatabaseConnection,
    chunk_size: usize,
}

impl SeaOrmRecordStore {
    pub fn new(db: DatabaseConnection, chunk_size: usize) -> Self {
        Self {
            db,
            chunk_size: chunk_size.max(1),
        }
    }
}

#[async_trait]
impl RecordStore for SeaOrmRecordStore {
    async fn insert_batch(&self, records: &[UploadRecord]) -> Result<(), UploadError> {
        if records.is_empty() {
            return Ok(());
        }

        // SQLite caps bound parameters per statement, so large batches are split
        // into several INSERTs sharing one transaction.
        let txn = self.db.begin().await?;
        for chunk in records.chunks(self.chunk_size) {
            let models = chunk.iter().map(uploaded_files::ActiveModel::from);
            UploadedFiles::insert_many(models).exec(&txn).await?;
        }
        txn.commit().await?;

        tracing::debug!(count = records.len(), "Upload records committed");
        Ok(())
    }
}
