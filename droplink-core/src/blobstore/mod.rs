pub mod cloudinary;

use crate::error::Result;
use async_trait::async_trait;
use bytes::Bytes;

/// Result of a successful blob-store upload.
#[derive(Debug, Clone)]
pub struct StoredBlob {
    /// Publicly fetchable address of the stored bytes.
    pub url: String,
}

/// The external object store uploaded files are forwarded to.
///
/// One operation: hand over the payload, get back a public URL. Failures
/// are terminal for the request; no retry is attempted and no compensating
/// delete is issued for blobs created before a later failure.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn store(
        &self,
        file_name: &str,
        content_type: Option<&str>,
        data: Bytes,
    ) -> Result<StoredBlob>;
}
