use crate::core::error::UploadError;
use crate::core::store::ObjectStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub payload: Vec<u8>,
    pub content_type: String,
}

/// In-memory object store keyed by `(bucket, key)`
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<HashMap<(String, String), StoredObject>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        let objects = self.inner.lock().await;
        objects.get(&(bucket.to_string(), key.to_string())).cloned()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        payload: &[u8],
        content_type: &str,
    ) -> Result<(), UploadError> {
        let mut objects = self.inner.lock().await;
        debug!(bucket, key, bytes = payload.len(), "Memory store PUT");
        objects.insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                payload: payload.to_vec(),
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }
}
