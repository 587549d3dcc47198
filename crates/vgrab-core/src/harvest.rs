//! One page visit: navigate, scroll to stability, read content, discover URLs.
//!
//! Driver and network errors are confined to this unit of work; the extraction
//! itself is pure and cannot fail. Zero candidates is a valid outcome; the
//! caller decides whether that is worth reporting as anything more than info.

use anyhow::Result;
use std::time::Duration;

use crate::driver::{scroll_until_stable, PageDriver};
use crate::extract::{discover, RankedList, SiteMode};

/// Knobs for a single harvest visit.
#[derive(Debug, Clone)]
pub struct HarvestOptions {
    /// Maximum scroll rounds before giving up on a still-growing page.
    pub scroll_max: u32,
    /// Delay after each scroll step.
    pub scroll_wait: Duration,
    /// Candidates containing any of these substrings are dropped.
    pub blocked_substrings: Vec<String>,
}

/// Visits `target_url` with `driver` and returns the ranked candidate list.
///
/// The ranking mode is detected from the target's hostname, so a threads.net
/// page promotes Instagram CDN URLs while other targets keep first-seen order.
pub async fn harvest_page<D: PageDriver>(
    driver: &mut D,
    target_url: &str,
    opts: &HarvestOptions,
) -> Result<RankedList> {
    let mode = SiteMode::detect(target_url);
    tracing::debug!("harvest mode for {target_url}: {mode:?}");

    driver.navigate(target_url).await?;

    let rounds = scroll_until_stable(driver, opts.scroll_max, opts.scroll_wait).await?;
    tracing::debug!("page settled after {rounds} scroll rounds");

    let html = driver.content().await?;
    let network_urls = driver.observed_urls();
    tracing::info!(
        "harvest sources: {} network responses, {} bytes of markup",
        network_urls.len(),
        html.len()
    );

    Ok(discover(&html, &network_urls, &opts.blocked_substrings, mode))
}
