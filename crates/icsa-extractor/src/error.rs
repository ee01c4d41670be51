use icsa_core::TableError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("export API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("export run ended as '{status}'")]
    JobFailed { status: String },

    #[error("export did not complete within {secs}s")]
    Timeout { secs: u64 },

    #[error("completed export carries no download link")]
    MissingDownload,

    #[error("downloaded file is not a readable table: {0}")]
    InvalidFile(#[source] TableError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
