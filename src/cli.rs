use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::downloader::DownloadConfig;

#[derive(Parser, Debug)]
#[command(name = "batch-dl")]
#[command(author, version, about = "Download resources listed in a URL file, in batches", long_about = None)]
pub struct Args {
    /// URL list file, one URL per line
    #[arg(short, long, default_value = "urls.txt")]
    pub input: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = "out")]
    pub output_dir: PathBuf,

    /// Number of concurrent downloads per batch
    #[arg(short = 'n', long, default_value = "10", value_parser = clap::value_parser!(u64).range(1..))]
    pub batch_size: u64,

    /// HTTP proxy (e.g., http://127.0.0.1:7890)
    #[arg(long)]
    pub proxy: Option<String>,

    /// Per-request timeout in seconds (no timeout when omitted)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Hide the batch progress bar
    #[arg(long)]
    pub no_progress: bool,
}

impl Args {
    pub fn download_config(&self) -> DownloadConfig {
        DownloadConfig {
            output_dir: self.output_dir.clone(),
            batch_size: self.batch_size as usize,
            proxy: self.proxy.clone(),
            timeout: self.timeout.map(Duration::from_secs),
            show_progress: !self.no_progress,
        }
    }
}
