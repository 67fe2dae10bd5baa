use crate::config::StorageConfig;
use crate::error::UploadError;
use crate::services::storage::{ObjectUrlStyle, S3StorageService};
use aws_sdk_s3::config::{Credentials, Region};
use std::sync::Arc;
use tracing::{info, warn};

pub async fn setup_storage(config: &StorageConfig) -> Result<Arc<S3StorageService>, UploadError> {
    let url_style = ObjectUrlStyle::from_config(config)?;

    info!(
        "☁️  S3 Storage: {} (Bucket: {}, Region: {})",
        config.endpoint.as_deref().unwrap_or("aws"),
        config.bucket,
        config.region
    );

    let mut loader = aws_config::from_env().region(Region::new(config.region.clone()));
    if let Some(endpoint) = &config.endpoint {
        loader = loader.endpoint_url(endpoint);
    }
    if let (Some(access_key), Some(secret_key)) = (&config.access_key, &config.secret_key) {
        loader = loader.credentials_provider(Credentials::new(
            access_key.clone(),
            secret_key.clone(),
            None,
            None,
            "static",
        ));
    }
    let aws_config = loader.load().await;

    let s3_config = aws_sdk_s3::config::Builder::from(&aws_config)
        .force_path_style(config.force_path_style)
        .build();

    let s3_client = aws_sdk_s3::Client::from_conf(s3_config);

    // Uploads report a missing bucket per file; this only makes it visible up front.
    match s3_client.head_bucket().bucket(&config.bucket).send().await {
        Ok(_) => info!("✅ Bucket '{}' is ready", config.bucket),
        Err(e) if config.create_bucket => {
            info!("🪣 Bucket '{}' not reachable ({}), creating...", config.bucket, e);
            if let Err(e) = s3_client.create_bucket().bucket(&config.bucket).send().await {
                tracing::error!("❌ Failed to create bucket '{}': {}", config.bucket, e);
            } else {
                info!("✅ Bucket '{}' created successfully", config.bucket);
            }
        }
        Err(e) => warn!("⚠️ Bucket '{}' is not reachable: {}", config.bucket, e),
    }

    Ok(Arc::new(S3StorageService::new(
        s3_client,
        config.bucket.clone(),
        url_style,
    )))
}
