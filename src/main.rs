use clap::Parser;
use dotenvy::dotenv;
use folder_uploader::infrastructure::{database, storage};
use folder_uploader::services::records::SeaOrmRecordStore;
use folder_uploader::{FolderUploadService, PersistenceOutcome, UploaderConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Root folder whose immediate subfolders are uploaded
    root: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folder_uploader=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("🚀 Uploading subfolders of {}", args.root.display());

    let config = UploaderConfig::from_env();
    config.validate()?;

    let db = database::setup_database(&config.database).await?;
    let storage_service = storage::setup_storage(&config.storage).await?;
    let record_store = Arc::new(SeaOrmRecordStore::new(
        db,
        config.database.insert_chunk_size,
    ));

    let uploader = FolderUploadService::new(storage_service, record_store);
    let summary = uploader.upload_folders(&args.root).await?;

    info!(
        "📊 Run finished: {} folder(s), {} uploaded, {} failed",
        summary.folders_processed,
        summary.records.len(),
        summary.failures.len()
    );
    match summary.persistence {
        PersistenceOutcome::Skipped => {}
        PersistenceOutcome::Persisted { count } => info!("💾 {} record(s) saved", count),
        PersistenceOutcome::Failed { reason } => warn!("Records were not saved: {}", reason),
    }

    Ok(())
}
