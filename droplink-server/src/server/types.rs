use serde::Serialize;

#[derive(Debug, Serialize)]
pub(crate) struct UploadResponse {
    pub status: &'static str,
    #[serde(rename = "uniqueId")]
    pub unique_id: String,
    #[serde(rename = "fileName")]
    pub file_name: String,
    #[serde(rename = "fileUrl")]
    pub file_url: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ErrorResponse {
    pub status: &'static str,
    pub message: &'static str,
}

pub(crate) const MSG_NO_FILE: &str = "No file received.";
pub(crate) const MSG_UPLOAD_FAILED: &str = "Server failed to process and save the file.";
pub(crate) const MSG_NOT_FOUND: &str = "File not found or link has expired.";
pub(crate) const MSG_FETCH_FAILED: &str = "Failed to retrieve the file from storage.";
