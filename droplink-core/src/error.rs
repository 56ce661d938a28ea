use thiserror::Error;

pub type Result<T> = std::result::Result<T, DropError>;

#[derive(Error, Debug)]
pub enum DropError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No file received")]
    NoFileReceived,

    #[error("Blob store upload failed: {0}")]
    UploadFailed(String),

    #[error("Relay fetch failed: {0}")]
    FetchFailed(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
