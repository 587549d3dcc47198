//! Batch download loop: sequential by default, optional bounded worker pool.
//!
//! Filenames derive from the ranked-list position before any work starts, so
//! `video_<index>` always reflects ranking order even when a pool finishes
//! items out of order.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::Mutex;

use crate::naming::{derive_filename, indexed_filename};

use super::{
    fetch_to_file, BatchSummary, DownloadOutcome, DownloadResult, FetchError, FetchOptions,
};

/// Fetch seam: one URL into one destination file, returning bytes written.
/// Production passes `fetch_to_file`; tests inject a fake.
pub type FetchFn = dyn Fn(&str, &Path) -> Result<u64, FetchError> + Sync;

/// One planned batch item.
struct PlannedItem {
    index: usize,
    url: String,
    dest: PathBuf,
}

/// Assigns destination paths up front. A batch-local filename collision falls
/// back to the indexed template, further disambiguated if the indexed name is
/// itself taken, so no two items share a destination.
fn plan_items(urls: &[String], output_dir: &Path) -> Vec<PlannedItem> {
    let mut taken: HashSet<String> = HashSet::new();
    urls.iter()
        .enumerate()
        .map(|(i, url)| {
            let index = i + 1;
            let mut name = derive_filename(url, index);
            if taken.contains(&name) {
                name = indexed_filename(index);
                let mut attempt = 1;
                while taken.contains(&name) {
                    name = format!("video_{index}_{attempt}.mp4");
                    attempt += 1;
                }
            }
            let inserted = taken.insert(name.clone());
            debug_assert!(inserted);
            PlannedItem {
                index,
                url: url.clone(),
                dest: output_dir.join(name),
            }
        })
        .collect()
}

/// Downloads `urls` into `output_dir` in ranked order, continuing past
/// per-item failures. `jobs` > 1 runs a bounded worker pool; ordering of the
/// returned summary always follows the input list.
///
/// Blocking; call from `spawn_blocking` in async contexts.
pub fn run_batch(
    urls: &[String],
    output_dir: &Path,
    jobs: usize,
    fetch: &FetchFn,
) -> Result<BatchSummary> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output dir: {}", output_dir.display()))?;

    let items = plan_items(urls, output_dir);
    let total = items.len();

    let run_one = |item: &PlannedItem| -> DownloadResult {
        tracing::info!(
            "downloading [{}/{}] {} -> {}",
            item.index,
            total,
            item.url,
            item.dest.display()
        );
        match fetch(&item.url, &item.dest) {
            Ok(bytes) => {
                tracing::info!("downloaded {} ({} bytes)", item.dest.display(), bytes);
                DownloadResult {
                    url: item.url.clone(),
                    outcome: DownloadOutcome::Succeeded {
                        path: item.dest.clone(),
                        bytes,
                    },
                }
            }
            Err(cause) => {
                tracing::warn!("failed: {} ({cause})", item.url);
                DownloadResult {
                    url: item.url.clone(),
                    outcome: DownloadOutcome::Failed { cause },
                }
            }
        }
    };

    let mut indexed_results: Vec<(usize, DownloadResult)> = if jobs <= 1 {
        items
            .iter()
            .map(|item| (item.index, run_one(item)))
            .collect()
    } else {
        let work: Mutex<VecDeque<&PlannedItem>> = Mutex::new(items.iter().collect());
        let (tx, rx) = mpsc::channel();
        let workers = jobs.min(total.max(1));

        std::thread::scope(|scope| {
            for _ in 0..workers {
                let tx = tx.clone();
                let work = &work;
                let run_one = &run_one;
                scope.spawn(move || loop {
                    let item = match work.lock().ok().and_then(|mut q| q.pop_front()) {
                        Some(item) => item,
                        None => break,
                    };
                    let _ = tx.send((item.index, run_one(item)));
                });
            }
            drop(tx);
            rx.iter().collect()
        })
    };

    // Summary in ranked order regardless of completion order.
    indexed_results.sort_by_key(|(index, _)| *index);
    let results = indexed_results.into_iter().map(|(_, r)| r).collect();

    let summary = BatchSummary { results };
    tracing::info!(
        "batch finished: {} ok, {} failed",
        summary.ok_count(),
        summary.failed_count()
    );
    Ok(summary)
}

/// Production batch entry point: single-attempt curl fetches.
pub fn download_videos(
    urls: &[String],
    output_dir: &Path,
    jobs: usize,
    opts: FetchOptions,
) -> Result<BatchSummary> {
    run_batch(urls, output_dir, jobs, &move |url, dest| {
        fetch_to_file(url, dest, opts)
    })
}
