use crate::error::{DownloadError, Result};
use crate::logging;
use crate::models::{self, DownloadItem, FetchOutcome, RunSummary};
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::{Client, StatusCode};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, error, info, warn};

const PROGRESS_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} batches {eta}";

#[derive(Debug, Clone)]
pub struct DownloadConfig {
    pub output_dir: PathBuf,
    pub batch_size: usize,
    pub proxy: Option<String>,
    pub timeout: Option<Duration>,
    pub show_progress: bool,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("out"),
            batch_size: 10,
            proxy: None,
            timeout: None,
            show_progress: true,
        }
    }
}

/// Fetches a URL list batch by batch. Every request of a batch is in flight at
/// once, and the next batch starts only after all of them have settled.
pub struct Downloader {
    client: Client,
    output_dir: PathBuf,
    batch_size: usize,
    show_progress: bool,
}

impl Downloader {
    pub fn new(config: &DownloadConfig) -> Result<Self> {
        let mut client_builder = Client::builder();

        if let Some(timeout) = config.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        if let Some(proxy_url) = config.proxy.as_deref() {
            let proxy = reqwest::Proxy::http(proxy_url).map_err(DownloadError::ClientBuild)?;
            client_builder = client_builder.proxy(proxy);
        }

        let client = client_builder.build().map_err(DownloadError::ClientBuild)?;

        Ok(Self::with_client(client, config))
    }

    /// Uses an existing client instead of building one from the config's
    /// proxy and timeout settings.
    pub fn with_client(client: Client, config: &DownloadConfig) -> Self {
        Self {
            client,
            output_dir: config.output_dir.clone(),
            batch_size: config.batch_size.max(1),
            show_progress: config.show_progress,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn read_urls(path: &Path) -> Result<Vec<String>> {
        let content = fs::read_to_string(path).map_err(|source| DownloadError::InputRead {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(models::parse_urls(&content))
    }

    pub async fn run(&self, input: &Path) -> Result<RunSummary> {
        let urls = Self::read_urls(input)?;

        for collision in models::find_collisions(&urls, &self.output_dir) {
            warn!(
                "{} and {} both map to {}",
                collision.first,
                collision.second,
                collision.filepath.display()
            );
        }

        let batches = models::partition(&urls, self.batch_size);
        let pb = self.progress_bar(batches.len() as u64);
        let _log_guard = self.show_progress.then(|| logging::attach_progress(&pb));
        let mut summary = RunSummary::default();

        for (idx, batch) in batches.enumerate() {
            let mut items = Vec::with_capacity(batch.len());
            for url in batch {
                match DownloadItem::new(url, &self.output_dir) {
                    Ok(item) => items.push(item),
                    Err(err) => {
                        error!("{err}");
                        summary.failed += 1;
                    }
                }
            }

            for result in self.fetch_batch(&items).await {
                summary.record(&result);
            }
            summary.batches += 1;
            pb.inc(1);
            debug!("batch {} finished ({} items)", idx, batch.len());
        }

        pb.finish();

        Ok(summary)
    }

    /// Starts a fetch for every item and waits until all of them have settled.
    /// Failures are logged here and never cancel sibling fetches.
    pub async fn fetch_batch(&self, items: &[DownloadItem]) -> Vec<Result<FetchOutcome>> {
        let results = join_all(items.iter().map(|item| self.fetch_one(item))).await;

        for err in results.iter().filter_map(|r| r.as_ref().err()) {
            error!("{err}");
        }

        results
    }

    pub async fn fetch_one(&self, item: &DownloadItem) -> Result<FetchOutcome> {
        if item.filepath.exists() {
            info!("skipping {} ({} exists)", item.url, item.filepath.display());
            return Ok(FetchOutcome::Skipped);
        }

        let network_error = |source: reqwest::Error| DownloadError::Network {
            url: item.url.clone(),
            source,
        };

        let response = self
            .client
            .get(&item.url)
            .send()
            .await
            .map_err(network_error)?;

        if response.status() != StatusCode::OK {
            return Err(DownloadError::HttpStatus {
                url: item.url.clone(),
                status: response.status(),
            });
        }

        let bytes = response.bytes().await.map_err(network_error)?;
        write_file(&item.filepath, &bytes)?;

        Ok(FetchOutcome::Downloaded { bytes: bytes.len() })
    }

    fn progress_bar(&self, batches: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(batches);
        let style = ProgressStyle::default_bar()
            .template(PROGRESS_TEMPLATE)
            .map(|style| style.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        pb
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let fs_error = |source: std::io::Error| DownloadError::FilesystemWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(fs_error)?;
    }
    fs::write(path, bytes).map_err(fs_error)
}
