use crate::config::Config;
use droplink_core::{
    BlobStore, CloudinaryCredentials, CloudinaryStore, DownloadOperation, DropError,
    MemoryRegistry, Registry, Result, UploadOperation,
};
use axum::extract::DefaultBodyLimit;
use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

mod external;
mod types;

use external::{download_file, download_upload_path, upload_file};
pub(crate) use types::*;

pub struct ServerState {
    pub(crate) upload_operation: Arc<UploadOperation>,
    pub(crate) download_operation: Arc<DownloadOperation>,
}

impl ServerState {
    pub fn new(
        registry: Arc<dyn Registry>,
        blob_store: Arc<dyn BlobStore>,
        request_timeout: Option<Duration>,
    ) -> Result<Self> {
        let upload_operation = Arc::new(UploadOperation::new(registry.clone(), blob_store));
        let download_operation = Arc::new(DownloadOperation::new(registry, request_timeout)?);

        Ok(Self {
            upload_operation,
            download_operation,
        })
    }
}

/// Build the relay router: uploads on POST, and any single path segment on
/// GET interpreted as a share identifier, the literal `/upload` included.
/// Every response carries the permissive CORS policy (any origin, GET/POST,
/// Content-Type).
pub fn router(state: Arc<ServerState>, max_upload_bytes: Option<usize>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let body_limit = match max_upload_bytes {
        Some(limit) => DefaultBodyLimit::max(limit),
        None => DefaultBodyLimit::disable(),
    };

    Router::new()
        .route("/upload", post(upload_file).get(download_upload_path))
        .route("/:unique_id", get(download_file))
        .layer(body_limit)
        .layer(cors)
        .with_state(state)
}

fn resolve_body_limit(max_upload_bytes: Option<u64>) -> Result<Option<usize>> {
    match max_upload_bytes {
        Some(limit) => usize::try_from(limit)
            .map(Some)
            .map_err(|_| {
                DropError::Config(format!(
                    "max_upload_bytes {} does not fit this platform",
                    limit
                ))
            }),
        None => Ok(None),
    }
}

pub async fn run_server(config: Config) -> Result<()> {
    let request_timeout = config
        .relay
        .request_timeout_secs
        .map(Duration::from_secs);

    let registry: Arc<dyn Registry> = Arc::new(MemoryRegistry::new());
    let blob_store: Arc<dyn BlobStore> = Arc::new(CloudinaryStore::new(
        CloudinaryCredentials {
            cloud_name: config.cloudinary.cloud_name.clone(),
            api_key: config.cloudinary.api_key.clone(),
            api_secret: config.cloudinary.api_secret.clone(),
        },
        config.cloudinary.folder.clone(),
        request_timeout,
    )?);

    let state = Arc::new(ServerState::new(registry, blob_store, request_timeout)?);
    let app = router(state, resolve_body_limit(config.server.max_upload_bytes)?);

    let listener = TcpListener::bind(&config.server.bind_addr).await?;
    tracing::info!("Droplink relay listening on {}", config.server.bind_addr);

    axum::serve(listener, app)
        .await
        .map_err(|error| DropError::Http(error.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_limit_absent_stays_unbounded() {
        assert_eq!(resolve_body_limit(None).unwrap(), None);
    }

    #[test]
    fn test_body_limit_converts_configured_value() {
        assert_eq!(resolve_body_limit(Some(1024)).unwrap(), Some(1024));
    }
}
