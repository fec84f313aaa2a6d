use std::path::PathBuf;
use thiserror::Error;

/// Failures of a batch run. Only `InputRead` and `ClientBuild` are fatal;
/// everything else is scoped to a single item and gets logged.
#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("Failed to read URL list {path}: {source}")]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Cannot derive a file name for {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("{url}: HTTP {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to write {path}: {source}")]
    FilesystemWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, DownloadError>;
