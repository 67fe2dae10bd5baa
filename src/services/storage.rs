use anyhow::Result;
use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::primitives::ByteStream;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use url::Url;

use crate::config::StorageConfig;
use crate::error::UploadError;

/// Characters left untouched when a key segment is placed in a URL path.
const KEY_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

#[async_trait]
pub trait StorageService: Send + Sync {
    /// Write `data` under `key` and return the location of the stored object.
    async fn upload_file(&self, key: &str, data: Vec<u8>) -> Result<String>;
}

/// How object locations are rendered for a given store.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectUrlStyle {
    /// `https://{bucket}.s3.{region}.amazonaws.com/{key}`
    Aws { region: String },
    /// `{endpoint}/{bucket}/{key}`
    PathStyle { endpoint: String },
    /// `{scheme}://{bucket}.{host}/{key}`
    VirtualHost { endpoint: Url },
}

impl ObjectUrlStyle {
    pub fn from_config(config: &StorageConfig) -> Result<Self, UploadError> {
        match &config.endpoint {
            None => Ok(Self::Aws {
                region: config.region.clone(),
            }),
            Some(endpoint) if config.force_path_style => Ok(Self::PathStyle {
                endpoint: endpoint.trim_end_matches('/').to_string(),
            }),
            Some(endpoint) => {
                let url = Url::parse(endpoint).map_err(|e| {
                    UploadError::Config(format!("Invalid S3_ENDPOINT '{}': {}", endpoint, e))
                })?;
                if url.host_str().is_none() {
                    return Err(UploadError::Config(format!(
                        "S3_ENDPOINT '{}' has no host",
                        endpoint
                    )));
                }
                Ok(Self::VirtualHost { endpoint: url })
            }
        }
    }

    pub fn object_url(&self, bucket: &str, key: &str) -> String {
        let path = encode_key(key);
        match self {
            Self::Aws { region } => {
                format!("https://{}.s3.{}.amazonaws.com/{}", bucket, region, path)
            }
            Self::PathStyle { endpoint } => format!("{}/{}/{}", endpoint, bucket, path),
            Self::VirtualHost { endpoint } => {
                let host = endpoint.host_str().unwrap_or_default();
                let authority = match endpoint.port() {
                    Some(port) => format!("{}.{}:{}", bucket, host, port),
                    None => format!("{}.{}", bucket, host),
                };
                format!("{}://{}/{}", endpoint.scheme(), authority, path)
            }
        }
    }
}

fn encode_key(key: &str) -> String {
    key.split('/')
        .map(|segment| utf8_percent_encode(segment, KEY_SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

pub struct S3StorageService {
    client: Client,
    bucket: String,
    url_style: ObjectUrlStyle,
}

impl S3StorageService {
    pub fn new(client: Client, bucket: String, url_style: ObjectUrlStyle) -> Self {
        Self {
            client,
            bucket,
            url_style,
        }
    }
}

#[async_trait]
impl StorageService for S3StorageService {
    async fn upload_file(&self, key: &str, data: Vec<u8>) -> Result<String> {
        let size = data.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data))
            .send()
            .await?;

        tracing::debug!(bucket = %self.bucket, key, size, "Object written");
        Ok(self.url_style.object_url(&self.bucket, key))
    }
}
