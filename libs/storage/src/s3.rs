use std::time::Duration;

use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::Client;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;

use crate::config::StorageConfig;
use crate::error::{StorageError, StorageResult};

/// S3-backed object storage bound to a single bucket
#[derive(Clone)]
pub struct ObjectStorage {
    client: Client,
    bucket: String,
    presign_expiry: Duration,
}

impl ObjectStorage {
    /// Build a client from the storage configuration.
    ///
    /// A custom endpoint switches to path-style addressing so
    /// S3-compatible stores work without virtual-host DNS.
    pub async fn connect(config: StorageConfig) -> StorageResult<Self> {
        let credentials = Credentials::new(
            config.access_key_id,
            config.secret_access_key,
            None,
            None,
            "env-credentials",
        );

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region))
            .credentials_provider(credentials)
            .load()
            .await;

        let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config);
        if let Some(endpoint) = config.endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        let client = Client::from_conf(builder.build());
        tracing::info!(bucket = %config.bucket, "Object storage client initialized");

        Ok(Self {
            client,
            bucket: config.bucket,
            presign_expiry: Duration::from_secs(config.presign_expiry_secs),
        })
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Upload an object
    pub async fn put_object(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(StorageError::backend)?;

        tracing::info!(key = %key, "Stored object");
        Ok(())
    }

    /// Download an object's bytes
    pub async fn get_object(&self, key: &str) -> StorageResult<Vec<u8>> {
        let response = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| match e.into_service_error() {
                err if err.is_no_such_key() => StorageError::NotFound(key.to_string()),
                err => StorageError::backend(err),
            })?;

        let bytes = response
            .body
            .collect()
            .await
            .map_err(StorageError::backend)?;

        Ok(bytes.into_bytes().to_vec())
    }

    /// List object keys under a prefix, following continuation tokens
    pub async fn list_objects(&self, prefix: &str) -> StorageResult<Vec<String>> {
        let mut keys = Vec::new();
        let mut continuation_token: Option<String> = None;

        loop {
            let mut request = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(prefix);

            if let Some(token) = continuation_token {
                request = request.continuation_token(token);
            }

            let response = request.send().await.map_err(StorageError::backend)?;

            if let Some(contents) = response.contents {
                keys.extend(contents.into_iter().filter_map(|object| object.key));
            }

            if !response.is_truncated.unwrap_or(false) {
                break;
            }

            continuation_token = response.next_continuation_token;
        }

        Ok(keys)
    }

    /// Delete a single object. S3 deletes are idempotent, so a missing
    /// key is not an error.
    pub async fn delete_object(&self, key: &str) -> StorageResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(StorageError::backend)?;

        tracing::info!(key = %key, "Deleted object");
        Ok(())
    }

    /// Delete every object under a prefix. Returns the number of objects
    /// removed.
    pub async fn delete_prefix(&self, prefix: &str) -> StorageResult<usize> {
        let keys = self.list_objects(prefix).await?;
        let count = keys.len();

        for key in keys {
            self.delete_object(&key).await?;
        }

        if count > 0 {
            tracing::info!(prefix = %prefix, count, "Deleted objects under prefix");
        }
        Ok(count)
    }

    /// Presigned URL for a direct client upload
    pub async fn presigned_put_url(&self, key: &str, content_type: &str) -> StorageResult<String> {
        let presigning = PresigningConfig::expires_in(self.presign_expiry)
            .map_err(StorageError::backend)?;

        let request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .presigned(presigning)
            .await
            .map_err(StorageError::backend)?;

        Ok(request.uri().into())
    }
}
