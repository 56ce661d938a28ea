use crate::error::{DropError, Result};
use crate::registry::Registry;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Resolves an identifier against the registry and opens a byte stream
/// from the recorded blob URL.
///
/// The lookup happens before anything touches the response, so a miss can
/// be answered without leaking attachment headers. The upstream body is
/// handed back untouched; the handler copies it verbatim.
#[derive(Clone)]
pub struct DownloadOperation {
    registry: Arc<dyn Registry>,
    client: Client,
}

#[derive(Debug)]
pub struct DownloadPayload {
    pub file_name: String,
    /// Upstream response, still streaming. Dropping it releases the
    /// connection, so a client abort mid-copy leaks nothing.
    pub upstream: reqwest::Response,
}

#[derive(Debug)]
pub enum DownloadOperationOutcome {
    Found(DownloadPayload),
    NotFound,
}

impl DownloadOperation {
    pub fn new(registry: Arc<dyn Registry>, request_timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|error| DropError::Config(error.to_string()))?;

        Ok(Self { registry, client })
    }

    pub async fn run(&self, id: &str) -> Result<DownloadOperationOutcome> {
        let record = match self.registry.get(id).await? {
            Some(record) => record,
            None => return Ok(DownloadOperationOutcome::NotFound),
        };

        let upstream = self
            .client
            .get(&record.file_url)
            .send()
            .await
            .map_err(|error| DropError::FetchFailed(error.to_string()))?;

        if !upstream.status().is_success() {
            return Err(DropError::FetchFailed(format!(
                "upstream fetch failed: id={} status={}",
                id,
                upstream.status()
            )));
        }

        Ok(DownloadOperationOutcome::Found(DownloadPayload {
            file_name: record.file_name,
            upstream,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::memory::MemoryRegistry;

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let registry = Arc::new(MemoryRegistry::new());
        let operation = DownloadOperation::new(registry, None).unwrap();

        let outcome = operation.run("doesNotExist123").await.unwrap();
        assert!(matches!(outcome, DownloadOperationOutcome::NotFound));
    }
}
