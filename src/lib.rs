pub mod cli;
pub mod downloader;
pub mod error;
pub mod logging;
pub mod models;

pub use downloader::{DownloadConfig, Downloader};
pub use error::DownloadError;
pub use models::{DownloadItem, FetchOutcome, RunSummary};
