//! `vgrab download <input-file>` – batch-download a saved URL list.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

use vgrab_core::config::VgrabConfig;
use vgrab_core::downloader::{self, FetchOptions};
use vgrab_core::input::read_url_list;

pub async fn run_download(
    cfg: &VgrabConfig,
    input_file: &Path,
    output_dir: Option<PathBuf>,
    jobs: Option<usize>,
) -> Result<()> {
    let urls = read_url_list(input_file)?;
    println!("Read {} URLs from {}", urls.len(), input_file.display());

    let urls = downloader::filter_video_urls(&urls);
    if urls.is_empty() {
        println!("No direct video (.mp4) URLs in the input list; nothing to download.");
        return Ok(());
    }

    let output_dir = output_dir.unwrap_or_else(|| cfg.output_dir.clone());
    let jobs = jobs.unwrap_or(cfg.jobs).max(1);
    let fetch_opts = FetchOptions {
        timeout: Duration::from_secs(cfg.download_timeout_secs),
        ..FetchOptions::default()
    };

    let summary = tokio::task::spawn_blocking(move || {
        downloader::download_videos(&urls, &output_dir, jobs, fetch_opts)
    })
    .await
    .context("download task panicked")??;

    println!(
        "Downloads finished: {} ok, {} failed",
        summary.ok_count(),
        summary.failed_count()
    );
    Ok(())
}
