//! Chromium-backed `PageDriver` implementation over CDP.
//!
//! Launches a single browser session per invocation. A network-response event
//! listener appends media-looking response URLs to an in-memory sequence; it
//! never performs I/O and never blocks the page load path.

use anyhow::{anyhow, Context, Result};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::EventResponseReceived;
use chromiumoxide::Page;
use futures::StreamExt;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::driver::PageDriver;
use crate::extract::patterns;

/// Desktop Chrome user agent presented to target pages.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/122 Safari/537.36";

/// Browser launch options.
#[derive(Debug, Clone)]
pub struct BrowserOptions {
    /// Run without a visible window.
    pub headless: bool,
    /// Navigation timeout.
    pub nav_timeout: Duration,
    /// Settle delay after navigation completes, before the page is used.
    pub settle_wait: Duration,
}

/// A live browser session driving a single page.
///
/// Dropping the session without calling [`BrowserSession::close`] leaves the
/// browser process to be reaped by the handler task aborting; prefer `close`.
pub struct BrowserSession {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
    listener_task: JoinHandle<()>,
    observed: Arc<Mutex<Vec<String>>>,
    opts: BrowserOptions,
}

impl BrowserSession {
    /// Launches a browser and opens a blank page with the response listener
    /// already attached, so responses from the very first navigation are
    /// observed.
    pub async fn launch(opts: BrowserOptions) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .window_size(1280, 800)
            .arg("--disable-blink-features=AutomationControlled")
            .arg("--disable-dev-shm-usage")
            .arg(format!("--user-agent={USER_AGENT}"));
        if !opts.headless {
            builder = builder.with_head();
        }
        let config = builder.build().map_err(|e| anyhow!(e))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .context("failed to launch browser")?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(err) = event {
                    tracing::debug!("browser handler event error: {err}");
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .context("failed to open page")?;

        let observed: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&observed);
        let mut events = page
            .event_listener::<EventResponseReceived>()
            .await
            .context("failed to attach response listener")?;

        // Append-only: the observer must never block the load path, so it only
        // pushes into memory. Dedup happens later in ranking.
        let listener_task = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                let url = event.response.url.as_str();
                if patterns().is_media_url(url) {
                    tracing::debug!("harvested network response url: {url}");
                    if let Ok(mut urls) = sink.lock() {
                        urls.push(url.to_string());
                    }
                }
            }
        });

        Ok(Self {
            browser,
            page,
            handler_task,
            listener_task,
            observed,
            opts,
        })
    }

    /// Persist the current page markup to `path` for inspection (debug mode).
    pub async fn dump_html(&self, path: &std::path::Path) -> Result<()> {
        let html = self.page.content().await.context("get page content")?;
        tokio::fs::write(path, html)
            .await
            .with_context(|| format!("write debug HTML to {}", path.display()))?;
        tracing::info!("debug HTML saved to {}", path.display());
        Ok(())
    }

    /// Close the page and the browser, and stop the background tasks.
    pub async fn close(self) -> Result<()> {
        let Self {
            mut browser,
            page,
            handler_task,
            listener_task,
            ..
        } = self;
        let _ = page.close().await;
        let _ = browser.close().await;
        let _ = browser.wait().await;
        listener_task.abort();
        handler_task.abort();
        Ok(())
    }
}

impl PageDriver for BrowserSession {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        tracing::info!("opening target: {url}");
        tokio::time::timeout(self.opts.nav_timeout, self.page.goto(url))
            .await
            .map_err(|_| anyhow!("navigation timed out after {:?}", self.opts.nav_timeout))?
            .with_context(|| format!("failed to navigate to {url}"))?;
        tokio::time::sleep(self.opts.settle_wait).await;
        Ok(())
    }

    async fn scroll_step(&mut self) -> Result<()> {
        self.page
            .evaluate("window.scrollTo(0, document.body.scrollHeight)")
            .await
            .context("scroll step failed")?;
        Ok(())
    }

    async fn page_height(&mut self) -> Result<u64> {
        let height: f64 = self
            .page
            .evaluate("document.body.scrollHeight")
            .await
            .context("page height query failed")?
            .into_value()
            .context("page height was not a number")?;
        Ok(height as u64)
    }

    async fn content(&mut self) -> Result<String> {
        self.page.content().await.context("get page content")
    }

    fn observed_urls(&self) -> Vec<String> {
        self.observed
            .lock()
            .map(|urls| urls.clone())
            .unwrap_or_default()
    }
}
