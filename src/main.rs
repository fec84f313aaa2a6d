use anyhow::{Context, Result};
use batch_dl::cli::Args;
use batch_dl::logging;
use batch_dl::Downloader;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_logging();

    let downloader =
        Downloader::new(&args.download_config()).context("Failed to set up downloader")?;

    let summary = downloader
        .run(&args.input)
        .await
        .with_context(|| format!("Batch download from {} failed", args.input.display()))?;

    println!(
        "Done: {} downloaded, {} skipped, {} failed ({} batches) into {}",
        summary.downloaded,
        summary.skipped,
        summary.failed,
        summary.batches,
        downloader.output_dir().display()
    );

    Ok(())
}
