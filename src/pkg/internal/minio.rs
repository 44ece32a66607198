use aws_sdk_s3::{
    config::{BehaviorVersion, Credentials, Region},
    error::DisplayErrorContext,
    primitives::ByteStream,
    Client,
};
use tracing::warn;

use crate::{conf::settings, errors::AppError, prelude::Result};

#[derive(Debug, Clone)]
pub struct BlobStore {
    client: Client,
    bucket: String,
    public_base: String,
}

impl BlobStore {
    /// Returns `None` when the endpoint or keys are unset, resume uploads
    /// stay disabled until the store is configured.
    pub fn from_settings() -> Option<Self> {
        if !settings.storage_configured() {
            warn!("blob store not configured, resume uploads disabled");
            return None;
        }
        Some(Self::new(
            &settings.s3_endpoint,
            &settings.s3_region,
            &settings.s3_access_key,
            &settings.s3_secret_key,
            &settings.s3_bucket_name,
            settings.object_base_url(),
        ))
    }

    fn new(
        endpoint: &str,
        region: &str,
        access_key: &str,
        secret_key: &str,
        bucket: &str,
        public_base: &str,
    ) -> Self {
        let conf = aws_sdk_s3::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .endpoint_url(endpoint)
            .credentials_provider(Credentials::new(access_key, secret_key, None, None, "placementd"))
            .force_path_style(true)
            .build();
        BlobStore {
            client: Client::from_conf(conf),
            bucket: bucket.to_string(),
            public_base: public_base.trim_end_matches('/').to_string(),
        }
    }

    pub async fn ensure_bucket(&self) -> Result<()> {
        let constraint =
            aws_sdk_s3::types::BucketLocationConstraint::from(settings.s3_region.as_str());
        let cfg = aws_sdk_s3::types::CreateBucketConfiguration::builder()
            .location_constraint(constraint)
            .build();
        let create = self
            .client
            .create_bucket()
            .create_bucket_configuration(cfg)
            .bucket(&self.bucket)
            .send()
            .await;
        create.map(|_| ()).or_else(|err| {
            if err
                .as_service_error()
                .map(|se| se.is_bucket_already_exists() || se.is_bucket_already_owned_by_you())
                == Some(true)
            {
                Ok(())
            } else {
                Err(AppError::BucketCreate(DisplayErrorContext(err).to_string()))
            }
        })
    }

    pub async fn upload_object(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|err| AppError::Upload(DisplayErrorContext(err).to_string()))?;
        Ok(())
    }

    pub async fn delete_object(&self, key: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| AppError::Storage(DisplayErrorContext(err).to_string()))?;
        Ok(())
    }

    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.public_base, self.bucket, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_store() -> BlobStore {
        BlobStore::new(
            "http://localhost:9000",
            "us-east-1",
            "minioadmin",
            "minioadmin",
            "resumes",
            "http://localhost:9000/",
        )
    }

    #[test]
    fn public_url_joins_base_bucket_and_key() {
        let store = local_store();
        assert_eq!(
            store.public_url("asha@example.com_1700000000000.pdf"),
            "http://localhost:9000/resumes/asha@example.com_1700000000000.pdf"
        );
    }

    #[tokio::test]
    #[ignore = "needs a local minio on :9000"]
    async fn ensure_bucket_is_idempotent() {
        let store = local_store();
        store.ensure_bucket().await.unwrap();
        store.ensure_bucket().await.unwrap();
    }

    #[tokio::test]
    #[ignore = "needs a local minio on :9000"]
    async fn upload_then_delete_roundtrip() {
        let store = local_store();
        store.ensure_bucket().await.unwrap();
        store
            .upload_object("it_test.pdf", b"%PDF-1.4".to_vec(), "application/pdf")
            .await
            .unwrap();
        store.delete_object("it_test.pdf").await.unwrap();
    }
}
