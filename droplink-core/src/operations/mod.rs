pub mod download;
pub mod upload;

pub use download::{DownloadOperation, DownloadOperationOutcome, DownloadPayload};
pub use upload::{UploadOperation, UploadOperationRequest};
