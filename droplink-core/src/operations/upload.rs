use crate::blobstore::BlobStore;
use crate::error::Result;
use crate::registry::Registry;
use crate::share::{generate_share_id, ShareRecord};
use bytes::Bytes;
use std::sync::Arc;

/// Accepts one binary payload, forwards it to the blob store, mints an
/// identifier, and records the result in the registry.
///
/// Either the registry gains a fully formed record or it gains none: the
/// registry write happens only after the store call succeeds, and a blob
/// created before a later failure is not cleaned up.
#[derive(Clone)]
pub struct UploadOperation {
    registry: Arc<dyn Registry>,
    blob_store: Arc<dyn BlobStore>,
}

#[derive(Debug, Clone)]
pub struct UploadOperationRequest {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl UploadOperation {
    pub fn new(registry: Arc<dyn Registry>, blob_store: Arc<dyn BlobStore>) -> Self {
        Self {
            registry,
            blob_store,
        }
    }

    pub async fn run(&self, request: UploadOperationRequest) -> Result<ShareRecord> {
        let stored = self
            .blob_store
            .store(
                &request.file_name,
                request.content_type.as_deref(),
                request.data,
            )
            .await?;

        let record = ShareRecord {
            id: generate_share_id(),
            file_name: request.file_name,
            file_url: stored.url,
        };
        self.registry.put(record.clone()).await?;

        tracing::info!(
            "Stored shared file. id={} name={} url={}",
            record.id,
            record.file_name,
            record.file_url
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blobstore::StoredBlob;
    use crate::error::DropError;
    use crate::registry::memory::MemoryRegistry;
    use crate::share::SHARE_ID_LENGTH;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StaticStore {
        uploads: AtomicUsize,
    }

    impl StaticStore {
        fn new() -> Self {
            Self {
                uploads: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl BlobStore for StaticStore {
        async fn store(
            &self,
            file_name: &str,
            _content_type: Option<&str>,
            _data: Bytes,
        ) -> Result<StoredBlob> {
            let n = self.uploads.fetch_add(1, Ordering::SeqCst);
            Ok(StoredBlob {
                url: format!("https://blobs.example/{}/{}", n, file_name),
            })
        }
    }

    struct FailingStore;

    #[async_trait]
    impl BlobStore for FailingStore {
        async fn store(
            &self,
            _file_name: &str,
            _content_type: Option<&str>,
            _data: Bytes,
        ) -> Result<StoredBlob> {
            Err(DropError::UploadFailed("provider rejected".to_string()))
        }
    }

    fn request(name: &str, body: &'static [u8]) -> UploadOperationRequest {
        UploadOperationRequest {
            file_name: name.to_string(),
            content_type: Some("text/plain".to_string()),
            data: Bytes::from_static(body),
        }
    }

    #[tokio::test]
    async fn test_upload_records_share() {
        let registry = Arc::new(MemoryRegistry::new());
        let operation = UploadOperation::new(registry.clone(), Arc::new(StaticStore::new()));

        let record = operation.run(request("a.txt", b"abc")).await.unwrap();
        assert_eq!(record.id.len(), SHARE_ID_LENGTH);
        assert_eq!(record.file_name, "a.txt");
        assert_eq!(record.file_url, "https://blobs.example/0/a.txt");

        let found = registry.get(&record.id).await.unwrap();
        assert_eq!(found, Some(record));
    }

    #[tokio::test]
    async fn test_two_uploads_produce_distinct_records() {
        let registry = Arc::new(MemoryRegistry::new());
        let operation = UploadOperation::new(registry.clone(), Arc::new(StaticStore::new()));

        let first = operation.run(request("one.bin", b"111")).await.unwrap();
        let second = operation.run(request("two.bin", b"222")).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_ne!(first.file_url, second.file_url);
        let one = registry.get(&first.id).await.unwrap().unwrap();
        let two = registry.get(&second.id).await.unwrap().unwrap();
        assert_eq!(one.file_name, "one.bin");
        assert_eq!(two.file_name, "two.bin");
    }

    #[tokio::test]
    async fn test_store_failure_is_terminal() {
        let registry = Arc::new(MemoryRegistry::new());
        let operation = UploadOperation::new(registry.clone(), Arc::new(FailingStore));

        let error = operation.run(request("a.txt", b"abc")).await.unwrap_err();
        assert!(matches!(error, DropError::UploadFailed(_)));
    }
}
