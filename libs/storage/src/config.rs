use core_config::{ConfigError, FromEnv, env_or_default, env_required};

/// Object-storage settings, loaded from the environment
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub bucket: String,
    pub region: String,
    /// Custom endpoint for S3-compatible stores (MinIO, LocalStack);
    /// empty means the real AWS endpoint
    pub endpoint: Option<String>,
    pub access_key_id: String,
    pub secret_access_key: String,
    /// Lifetime of presigned upload URLs in seconds
    pub presign_expiry_secs: u64,
}

impl FromEnv for StorageConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let presign_expiry_secs = env_or_default("STORAGE_PRESIGN_EXPIRY_SECS", "900")
            .parse()
            .map_err(|e| ConfigError::ParseError {
                key: "STORAGE_PRESIGN_EXPIRY_SECS".to_string(),
                details: format!("{}", e),
            })?;

        Ok(Self {
            bucket: env_required("STORAGE_BUCKET")?,
            region: env_or_default("AWS_REGION", "us-east-1"),
            endpoint: std::env::var("STORAGE_ENDPOINT").ok().filter(|e| !e.is_empty()),
            access_key_id: env_required("AWS_ACCESS_KEY_ID")?,
            secret_access_key: env_required("AWS_SECRET_ACCESS_KEY")?,
            presign_expiry_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_from_env() {
        temp_env::with_vars(
            [
                ("STORAGE_BUCKET", Some("catalog-images")),
                ("AWS_ACCESS_KEY_ID", Some("AKIATEST")),
                ("AWS_SECRET_ACCESS_KEY", Some("secret")),
                ("STORAGE_ENDPOINT", Some("http://localhost:9000")),
            ],
            || {
                let config = StorageConfig::from_env().unwrap();
                assert_eq!(config.bucket, "catalog-images");
                assert_eq!(config.region, "us-east-1");
                assert_eq!(config.endpoint.as_deref(), Some("http://localhost:9000"));
                assert_eq!(config.presign_expiry_secs, 900);
            },
        );
    }

    #[test]
    fn missing_bucket_is_an_error() {
        temp_env::with_vars(
            [
                ("STORAGE_BUCKET", None::<&str>),
                ("AWS_ACCESS_KEY_ID", Some("AKIATEST")),
                ("AWS_SECRET_ACCESS_KEY", Some("secret")),
            ],
            || {
                assert!(matches!(
                    StorageConfig::from_env(),
                    Err(ConfigError::MissingEnvVar(key)) if key == "STORAGE_BUCKET"
                ));
            },
        );
    }
}
