//! Object storage abstraction

use super::error::UploadError;
use async_trait::async_trait;

pub const JSON_CONTENT_TYPE: &str = "application/json";

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Writes `payload` as the full content of `bucket/key`, replacing any existing object.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        payload: &[u8],
        content_type: &str,
    ) -> Result<(), UploadError>;
}
