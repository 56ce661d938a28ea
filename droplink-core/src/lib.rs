//! Droplink Core - Core library for the droplink file-sharing relay

pub mod blobstore;
pub mod error;
pub mod operations;
pub mod registry;
pub mod share;

pub use blobstore::cloudinary::{CloudinaryCredentials, CloudinaryStore};
pub use blobstore::{BlobStore, StoredBlob};
pub use error::{DropError, Result};
pub use operations::download::{
    DownloadOperation, DownloadOperationOutcome, DownloadPayload,
};
pub use operations::upload::{UploadOperation, UploadOperationRequest};
pub use registry::memory::MemoryRegistry;
pub use registry::Registry;
pub use share::{generate_share_id, ShareRecord, SHARE_ID_LENGTH};
