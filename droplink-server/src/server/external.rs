use super::{
    ErrorResponse, ServerState, UploadResponse, MSG_FETCH_FAILED, MSG_NOT_FOUND, MSG_NO_FILE,
    MSG_UPLOAD_FAILED,
};
use axum::{
    body::Body,
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use droplink_core::{
    DownloadOperationOutcome, DownloadPayload, DropError, UploadOperationRequest,
};
use std::sync::Arc;

/// Form field name the uploaded file must arrive under.
const UPLOAD_FIELD: &str = "sharedFiles";

pub(crate) async fn upload_file(
    State(state): State<Arc<ServerState>>,
    mut multipart: Multipart,
) -> Response {
    let mut request: Option<UploadOperationRequest> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(error) => {
                tracing::warn!("Failed to read multipart field: {}", error);
                request = None;
                break;
            }
        };

        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = match field.file_name() {
            Some(name) => name.to_string(),
            None => continue,
        };
        let content_type = field.content_type().map(str::to_string);

        let data = match field.bytes().await {
            Ok(data) => data,
            Err(error) => {
                tracing::warn!("Failed to read uploaded file body: {}", error);
                request = None;
                break;
            }
        };

        request = Some(UploadOperationRequest {
            file_name,
            content_type,
            data,
        });
        break;
    }

    let outcome = match request {
        Some(request) => state.upload_operation.run(request).await,
        None => Err(DropError::NoFileReceived),
    };

    match outcome {
        Ok(record) => (
            StatusCode::OK,
            Json(UploadResponse {
                status: "success",
                unique_id: record.id,
                file_name: record.file_name,
                file_url: record.file_url,
            }),
        )
            .into_response(),
        Err(DropError::NoFileReceived) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                status: "error",
                message: MSG_NO_FILE,
            }),
        )
            .into_response(),
        Err(error) => {
            tracing::error!("Upload failed: {}", error);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    status: "error",
                    message: MSG_UPLOAD_FAILED,
                }),
            )
                .into_response()
        }
    }
}

pub(crate) async fn download_file(
    State(state): State<Arc<ServerState>>,
    Path(unique_id): Path<String>,
) -> Response {
    relay_download(state, &unique_id).await
}

/// `GET /upload` is still a single path segment, so the literal falls
/// through to a registry lookup like any other identifier.
pub(crate) async fn download_upload_path(State(state): State<Arc<ServerState>>) -> Response {
    relay_download(state, "upload").await
}

async fn relay_download(state: Arc<ServerState>, unique_id: &str) -> Response {
    // Lookup happens before any header is set so a miss stays a bare 404.
    let payload = match state.download_operation.run(unique_id).await {
        Ok(DownloadOperationOutcome::Found(payload)) => payload,
        Ok(DownloadOperationOutcome::NotFound) => {
            return (StatusCode::NOT_FOUND, MSG_NOT_FOUND).into_response();
        }
        Err(error) => {
            tracing::error!("Download failed. id={} error={}", unique_id, error);
            return (StatusCode::INTERNAL_SERVER_ERROR, MSG_FETCH_FAILED).into_response();
        }
    };

    let DownloadPayload {
        file_name,
        upstream,
    } = payload;

    // The real media type is not preserved; every download is announced as
    // a generic binary attachment under the stored file name.
    let built = Response::builder()
        .status(StatusCode::OK)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file_name),
        )
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .body(Body::from_stream(upstream.bytes_stream()));

    match built {
        Ok(response) => response,
        Err(error) => {
            tracing::error!(
                "Failed to build download response. id={} error={}",
                unique_id,
                error
            );
            (StatusCode::INTERNAL_SERVER_ERROR, MSG_FETCH_FAILED).into_response()
        }
    }
}
