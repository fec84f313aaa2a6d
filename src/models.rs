use crate::error::{DownloadError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::slice::Chunks;

/// One URL paired with the local path it is written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadItem {
    pub url: String,
    pub filepath: PathBuf,
}

impl DownloadItem {
    pub fn new(url: &str, output_dir: &Path) -> Result<Self> {
        Ok(Self {
            url: url.to_string(),
            filepath: mk_filepath(url, output_dir)?,
        })
    }
}

/// Derives `<output_dir>/<last segment of the URL path>`.
///
/// Query and fragment are ignored. A URL whose path ends in `/` has an empty
/// last segment and is rejected, as are URLs that don't parse.
pub fn mk_filepath(url: &str, output_dir: &Path) -> Result<PathBuf> {
    let parsed = url::Url::parse(url).map_err(|e| DownloadError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    let filename = parsed.path().rsplit('/').next().unwrap_or("");
    if filename.is_empty() || filename == "." || filename == ".." {
        return Err(DownloadError::InvalidUrl {
            url: url.to_string(),
            reason: "URL path has no file name".to_string(),
        });
    }

    Ok(output_dir.join(filename))
}

/// Splits a URL list into trimmed, non-empty lines, keeping file order.
pub fn parse_urls(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Consecutive batches of `batch_size` URLs; the last one may be shorter.
pub fn partition(urls: &[String], batch_size: usize) -> Chunks<'_, String> {
    urls.chunks(batch_size.max(1))
}

/// A URL whose file name was already claimed by an earlier URL in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    pub first: String,
    pub second: String,
    pub filepath: PathBuf,
}

pub fn find_collisions(urls: &[String], output_dir: &Path) -> Vec<Collision> {
    let mut seen: HashMap<PathBuf, &str> = HashMap::new();
    let mut collisions = Vec::new();

    for url in urls {
        let Ok(filepath) = mk_filepath(url, output_dir) else {
            continue;
        };
        match seen.get(&filepath) {
            Some(first) if *first != url.as_str() => collisions.push(Collision {
                first: first.to_string(),
                second: url.clone(),
                filepath,
            }),
            Some(_) => {}
            None => {
                seen.insert(filepath, url);
            }
        }
    }

    collisions
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Downloaded { bytes: usize },
    Skipped,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub batches: usize,
    pub downloaded: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn record(&mut self, result: &Result<FetchOutcome>) {
        match result {
            Ok(FetchOutcome::Downloaded { .. }) => self.downloaded += 1,
            Ok(FetchOutcome::Skipped) => self.skipped += 1,
            Err(_) => self.failed += 1,
        }
    }
}
