//! Best-effort download phase.
//!
//! Consumes a ranked URL list, filters it to direct video files, fetches each
//! with a single attempt (no retry), and reports success/failure per item plus
//! an aggregate summary. A failed item never aborts the batch.

mod run;
mod single;

pub use run::{download_videos, run_batch, FetchFn};
pub use single::fetch_to_file;

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Error from a single download attempt. One attempt per URL; callers log the
/// cause and move on.
#[derive(Debug)]
pub enum FetchError {
    /// Curl reported an error (timeout, connection, TLS, aborted transfer).
    Curl(curl::Error),
    /// HTTP response had a non-2xx status.
    Http(u32),
    /// Disk/storage write failed (e.g. disk full, permission denied).
    Storage(std::io::Error),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Curl(e) => write!(f, "{}", e),
            FetchError::Http(code) => write!(f, "HTTP {}", code),
            FetchError::Storage(e) => write!(f, "storage: {}", e),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Curl(e) => Some(e),
            FetchError::Storage(e) => Some(e),
            FetchError::Http(_) => None,
        }
    }
}

/// Transfer tuning for one download attempt.
#[derive(Debug, Clone, Copy)]
pub struct FetchOptions {
    /// Hard wall-clock timeout for the whole transfer.
    pub timeout: Duration,
    /// Receive buffer size passed to libcurl (chunked streaming granularity).
    pub buffer_size: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(120),
            buffer_size: 256 * 1024,
        }
    }
}

/// Outcome of one attempted URL.
#[derive(Debug)]
pub enum DownloadOutcome {
    /// File written and renamed into place.
    Succeeded { path: PathBuf, bytes: u64 },
    /// Attempt failed; no file remains at a final location.
    Failed { cause: FetchError },
}

/// Pairs a URL with its outcome. Produced once per attempted URL.
#[derive(Debug)]
pub struct DownloadResult {
    pub url: String,
    pub outcome: DownloadOutcome,
}

impl DownloadResult {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, DownloadOutcome::Succeeded { .. })
    }
}

/// Aggregate result of a batch, in ranked-list order.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub results: Vec<DownloadResult>,
}

impl BatchSummary {
    pub fn ok_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.results.len() - self.ok_count()
    }
}

/// Keeps only URLs recognizable as direct video files: case-insensitive
/// `.mp4` containment, so query-string variants survive.
pub fn filter_video_urls(urls: &[String]) -> Vec<String> {
    urls.iter()
        .filter(|u| u.to_lowercase().contains(".mp4"))
        .cloned()
        .collect()
}
