//! `vgrab grab <url>` – harvest candidate URLs from one page, then download.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

use vgrab_core::browser::{BrowserOptions, BrowserSession};
use vgrab_core::config::VgrabConfig;
use vgrab_core::downloader::{self, FetchOptions};
use vgrab_core::extract::RankedList;
use vgrab_core::harvest::{harvest_page, HarvestOptions};
use vgrab_core::input::validate_target_url;
use vgrab_core::url_list::write_url_list;

/// Arguments for one grab run; `None` fields fall back to config values.
#[derive(Debug)]
pub struct GrabArgs {
    pub target_url: String,
    pub headful: bool,
    pub debug_html: bool,
    pub scroll_max: Option<u32>,
    pub wait_ms: Option<u64>,
    pub urls_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub no_download: bool,
}

pub async fn run_grab(cfg: &VgrabConfig, args: GrabArgs) -> Result<()> {
    let target = validate_target_url(&args.target_url)?;

    let browser_opts = BrowserOptions {
        headless: cfg.headless && !args.headful,
        nav_timeout: Duration::from_secs(cfg.nav_timeout_secs),
        settle_wait: Duration::from_millis(cfg.settle_wait_ms),
    };
    let harvest_opts = HarvestOptions {
        scroll_max: args.scroll_max.unwrap_or(cfg.scroll_max),
        scroll_wait: Duration::from_millis(args.wait_ms.unwrap_or(cfg.scroll_wait_ms)),
        blocked_substrings: cfg.blocked_substrings.clone(),
    };

    let mut session = BrowserSession::launch(browser_opts).await?;

    // One page visit is one unit of work: an unreachable or timed-out page
    // yields zero candidates, not a crash.
    let ranked = match harvest_page(&mut session, &target, &harvest_opts).await {
        Ok(ranked) => ranked,
        Err(err) => {
            tracing::warn!("page visit failed for {target}: {err:#}");
            RankedList::from(Vec::new())
        }
    };

    let debug_html = args.debug_html || cfg.debug_html;
    if debug_html {
        if let Err(err) = session.dump_html(std::path::Path::new("debug_page.html")).await {
            tracing::warn!("debug HTML dump failed: {err:#}");
        }
    }
    session.close().await?;

    if ranked.is_empty() {
        println!("No video candidates found at {target}");
        return Ok(());
    }

    let urls_file = args.urls_file.unwrap_or_else(|| cfg.urls_file.clone());
    write_url_list(&urls_file, ranked.as_slice())?;
    println!(
        "Found {} candidate URLs (saved to {})",
        ranked.len(),
        urls_file.display()
    );

    if args.no_download {
        return Ok(());
    }

    let urls = downloader::filter_video_urls(ranked.as_slice());
    if urls.is_empty() {
        println!("No direct video (.mp4) URLs among the candidates; nothing to download.");
        return Ok(());
    }

    let output_dir = args.output_dir.unwrap_or_else(|| cfg.output_dir.clone());
    let jobs = cfg.jobs;
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
