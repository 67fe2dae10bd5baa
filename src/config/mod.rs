use crate::error::UploadError;
use std::env;

/// Object storage connection settings
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Bucket every object is written to (required)
    pub bucket: String,

    /// AWS region (default: "us-east-1")
    pub region: String,

    /// Custom endpoint for MinIO or other S3-compatible stores
    pub endpoint: Option<String>,

    /// Static access key; the default AWS provider chain is used when unset
    pub access_key: Option<String>,

    /// Static secret key, paired with `access_key`
    pub secret_key: Option<String>,

    /// Address buckets as `{endpoint}/{bucket}` instead of `{bucket}.{endpoint}`
    pub force_path_style: bool,

    /// Create the bucket at startup when it does not exist (default: false)
    pub create_bucket: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            region: "us-east-1".to_string(),
            endpoint: None,
            access_key: None,
            secret_key: None,
            force_path_style: false,
            create_bucket: false,
        }
    }
}

/// Relational database settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// SeaORM connection URL (default: local SQLite file)
    pub url: String,

    /// Connection pool size (default: 5)
    pub max_connections: u32,

    /// Rows per INSERT statement inside the batch transaction (default: 500)
    pub insert_chunk_size: usize,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://uploads.db?mode=rwc".to_string(),
            max_connections: 5,
            insert_chunk_size: 500,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UploaderConfig {
    pub storage: StorageConfig,
    pub database: DatabaseConfig,
}

impl UploaderConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// The `AWS_*` names are accepted as fallbacks for deployments that still
    /// export the old variable set.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage_default = StorageConfig::default();
        let database_default = DatabaseConfig::default();

        let first = |keys: &[&str]| {
            keys.iter()
                .find_map(|&key| lookup(key).filter(|v| !v.trim().is_empty()))
        };

        let endpoint = first(&["S3_ENDPOINT"]);
        let force_path_style = first(&["S3_FORCE_PATH_STYLE"])
            .map(|v| parse_flag(&v))
            .unwrap_or(endpoint.is_some());

        let storage = StorageConfig {
            bucket: first(&["S3_BUCKET", "AWS_BUCKET_NAME"]).unwrap_or(storage_default.bucket),
            region: first(&["S3_REGION", "AWS_REGION"]).unwrap_or(storage_default.region),
            endpoint,
            access_key: first(&["S3_ACCESS_KEY", "AWS_ACCESS_KEY"]),
            secret_key: first(&["S3_SECRET_KEY", "AWS_SECRET_KEY"]),
            force_path_style,
            create_bucket: first(&["S3_CREATE_BUCKET"])
                .map(|v| parse_flag(&v))
                .unwrap_or(storage_default.create_bucket),
        };

        let database = DatabaseConfig {
            url: first(&["DATABASE_URL"]).unwrap_or(database_default.url),
            max_connections: first(&["DB_MAX_CONNECTIONS"])
                .and_then(|v| v.parse().ok())
                .unwrap_or(database_default.max_connections),
            insert_chunk_size: first(&["DB_INSERT_CHUNK_SIZE"])
                .and_then(|v| v.parse().ok())
                .unwrap_or(database_default.insert_chunk_size),
        };

        Self { storage, database }
    }

    pub fn validate(&self) -> Result<(), UploadError> {
        if self.storage.bucket.trim().is_empty() {
            return Err(UploadError::Config(
                "S3_BUCKET must be set".to_string(),
            ));
        }
        if self.storage.access_key.is_some() != self.storage.secret_key.is_some() {
            return Err(UploadError::Config(
                "S3_ACCESS_KEY and S3_SECRET_KEY must be set together".to_string(),
            ));
        }
        if self.database.insert_chunk_size == 0 {
            return Err(UploadError::Config(
                "DB_INSERT_CHUNK_SIZE must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = UploaderConfig::from_lookup(|_| None);
        assert_eq!(config.storage.region, "us-east-1");
        assert!(config.storage.endpoint.is_none());
        assert!(!config.storage.force_path_style);
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.database.insert_chunk_size, 500);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_endpoint_implies_path_style() {
        let config = UploaderConfig::from_lookup(lookup_from(&[
            ("S3_BUCKET", "uploads"),
            ("S3_ENDPOINT", "http://127.0.0.1:9000"),
        ]));
        assert!(config.storage.force_path_style);
        assert!(config.validate().is_ok());

        let config = UploaderConfig::from_lookup(lookup_from(&[
            ("S3_BUCKET", "uploads"),
            ("S3_ENDPOINT", "http://127.0.0.1:9000"),
            ("S3_FORCE_PATH_STYLE", "false"),
        ]));
        assert!(!config.storage.force_path_style);
    }

    #[test]
    fn test_legacy_aws_names() {
        let config = UploaderConfig::from_lookup(lookup_from(&[
            ("AWS_BUCKET_NAME", "legacy-bucket"),
            ("AWS_REGION", "eu-west-1"),
            ("AWS_ACCESS_KEY", "key"),
            ("AWS_SECRET_KEY", "secret"),
        ]));
        assert_eq!(config.storage.bucket, "legacy-bucket");
        assert_eq!(config.storage.region, "eu-west-1");
        assert_eq!(config.storage.access_key.as_deref(), Some("key"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_new_names_take_precedence() {
        let config = UploaderConfig::from_lookup(lookup_from(&[
            ("S3_BUCKET", "primary"),
            ("AWS_BUCKET_NAME", "legacy"),
        ]));
        assert_eq!(config.storage.bucket, "primary");
    }

    #[test]
    fn test_half_configured_credentials_rejected() {
        let config = UploaderConfig::from_lookup(lookup_from(&[
            ("S3_BUCKET", "uploads"),
            ("S3_ACCESS_KEY", "key"),
        ]));
        assert!(matches!(config.validate(), Err(UploadError::Config(_))));
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let config = UploaderConfig::from_lookup(lookup_from(&[
            ("S3_BUCKET", "uploads"),
            ("DB_INSERT_CHUNK_SIZE", "0"),
        ]));
        assert!(config.validate().is_err());
    }
}
