use crate::blobstore::{BlobStore, StoredBlob};
use crate::error::{DropError, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use sha1::{Digest, Sha1};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Credentials for the Cloudinary upload API, normally sourced from
/// environment variables via the server configuration.
#[derive(Debug, Clone)]
pub struct CloudinaryCredentials {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

/// Blob-store backend speaking the Cloudinary upload API.
///
/// Uploads go to the `auto` resource type so the provider detects the
/// media kind itself, filed under a fixed folder. Requests are signed with
/// the account secret; there is no retry on failure.
pub struct CloudinaryStore {
    client: Client,
    credentials: CloudinaryCredentials,
    folder: String,
}

#[derive(Debug, Deserialize)]
struct UploadApiResponse {
    secure_url: String,
}

impl CloudinaryStore {
    pub fn new(
        credentials: CloudinaryCredentials,
        folder: String,
        request_timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|error| DropError::Config(error.to_string()))?;

        Ok(Self {
            client,
            credentials,
            folder,
        })
    }

    fn upload_url(&self) -> String {
        format!(
            "https://api.cloudinary.com/v1_1/{}/auto/upload",
            self.credentials.cloud_name
        )
    }

    /// SHA-1 hex over the alphabetically sorted signed params with the API
    /// secret appended, per the provider's signing scheme.
    fn sign(&self, timestamp: u64) -> String {
        let to_sign = format!(
            "folder={}&timestamp={}{}",
            self.folder, timestamp, self.credentials.api_secret
        );
        let mut hasher = Sha1::new();
        hasher.update(to_sign.as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[async_trait]
impl BlobStore for CloudinaryStore {
    async fn store(
        &self,
        file_name: &str,
        content_type: Option<&str>,
        data: Bytes,
    ) -> Result<StoredBlob> {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|error| DropError::Internal(error.to_string()))?
            .as_secs();
        let signature = self.sign(timestamp);

        let mut file_part = Part::stream(data).file_name(file_name.to_string());
        if let Some(media_type) = content_type {
            file_part = file_part
                .mime_str(media_type)
                .map_err(|error| DropError::UploadFailed(error.to_string()))?;
        }

        let form = Form::new()
            .part("file", file_part)
            .text("api_key", self.credentials.api_key.clone())
            .text("timestamp", timestamp.to_string())
            .text("signature", signature)
            .text("folder", self.folder.clone());

        let response = self
            .client
            .post(self.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(|error| DropError::UploadFailed(error.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(DropError::UploadFailed(format!(
                "upload rejected: status={} body={}",
                status, detail
            )));
        }

        let payload: UploadApiResponse = response
            .json()
            .await
            .map_err(|error| DropError::UploadFailed(error.to_string()))?;

        Ok(StoredBlob {
            url: payload.secure_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_is_stable_hex() {
        let store = CloudinaryStore::new(
            CloudinaryCredentials {
                cloud_name: "demo".to_string(),
                api_key: "key".to_string(),
                api_secret: "secret".to_string(),
            },
            "shared_files".to_string(),
            None,
        )
        .unwrap();

        let first = store.sign(1_700_000_000);
        let second = store.sign(1_700_000_000);
        assert_eq!(first, second);
        assert_eq!(first.len(), 40);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_upload_url_targets_auto_resource_type() {
        let store = CloudinaryStore::new(
            CloudinaryCredentials {
                cloud_name: "demo".to_string(),
                api_key: "key".to_string(),
                api_secret: "secret".to_string(),
            },
            "shared_files".to_string(),
            None,
        )
        .unwrap();

        assert_eq!(
            store.upload_url(),
            "https://api.cloudinary.com/v1_1/demo/auto/upload"
        );
    }
}
