use crate::core::error::UploadError;
use crate::core::store::ObjectStore;
use async_trait::async_trait;
use s3::creds::Credentials;
use s3::{Bucket, Region};
use tracing::{debug, instrument};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// S3 (or S3-compatible) object store.
#[derive(Debug, Clone)]
pub struct S3Store {
    region: String,
    endpoint: Option<String>,
    /// `None` resolves credentials from the execution environment at upload time.
    credentials: Option<Credentials>,
}

impl S3Store {
    pub fn new(region: &str, endpoint: Option<&str>) -> Self {
        Self {
            region: region.to_string(),
            endpoint: endpoint.map(str::to_string),
            credentials: None,
        }
    }

    pub fn with_credentials(region: &str, endpoint: Option<&str>, credentials: Credentials) -> Self {
        Self {
            credentials: Some(credentials),
            ..Self::new(region, endpoint)
        }
    }

    fn region(&self) -> Result<Region, BoxError> {
        match &self.endpoint {
            Some(endpoint) => Ok(Region::Custom {
                region: self.region.clone(),
                endpoint: endpoint.clone(),
            }),
            None => Ok(self.region.parse::<Region>()?),
        }
    }

    async fn credentials(&self) -> Result<Credentials, BoxError> {
        if let Some(credentials) = &self.credentials {
            return Ok(credentials.clone());
        }
        // Profile and instance-metadata lookups block.
        let credentials = tokio::task::spawn_blocking(Credentials::default).await??;
        Ok(credentials)
    }

    async fn bucket(&self, name: &str) -> Result<Box<Bucket>, BoxError> {
        let creds = self.credentials().await?;
        let bucket = Bucket::new(name, self.region()?, creds)?;
        // S3-compatible servers rarely support virtual-host addressing.
        if self.endpoint.is_some() {
            return Ok(bucket.with_path_style());
        }
        Ok(bucket)
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    #[instrument(name = "S3Upload", skip(self, payload), fields(region = %self.region, bytes = payload.len()))]
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        payload: &[u8],
        content_type: &str,
    ) -> Result<(), UploadError> {
        let s3_bucket = self
            .bucket(bucket)
            .await
            .map_err(|e| UploadError::new(bucket, key, e))?;

        let response = s3_bucket
            .put_object_with_content_type(key, payload, content_type)
            .await
            .map_err(|e| UploadError::new(bucket, key, e))?;

        let status = response.status_code();
        debug!(status, "S3 put finished");
        if !(200..300).contains(&status) {
            return Err(UploadError::new(
                bucket,
                key,
                format!("S3 responded with status {status}"),
            ));
        }
        Ok(())
    }
}
