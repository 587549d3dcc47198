use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Global configuration loaded from `~/.config/vgrab/config.toml`.
///
/// CLI flags override individual fields per invocation; the file only provides
/// defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VgrabConfig {
    /// Maximum number of scroll rounds before giving up on a still-growing page.
    pub scroll_max: u32,
    /// Delay after each scroll step, in milliseconds.
    pub scroll_wait_ms: u64,
    /// Run the browser without a visible window.
    pub headless: bool,
    /// Persist the raw page HTML next to the URL list for inspection.
    pub debug_html: bool,
    /// Page navigation timeout in seconds.
    pub nav_timeout_secs: u64,
    /// Settle delay after navigation, before scrolling starts, in milliseconds.
    pub settle_wait_ms: u64,
    /// Hard per-file download timeout in seconds.
    pub download_timeout_secs: u64,
    /// Directory downloaded files are written to.
    pub output_dir: PathBuf,
    /// File the discovered candidate URLs are written to.
    pub urls_file: PathBuf,
    /// Number of concurrent download workers.
    pub jobs: usize,
    /// Candidates containing any of these substrings are dropped
    /// (compared case-insensitively).
    #[serde(default = "default_blocked_substrings")]
    pub blocked_substrings: Vec<String>,
}

fn default_blocked_substrings() -> Vec<String> {
    vec!["analytics".to_string(), "metric".to_string()]
}

impl Default for VgrabConfig {
    fn default() -> Self {
        Self {
            scroll_max: 12,
            scroll_wait_ms: 2000,
            headless: true,
            debug_html: false,
            nav_timeout_secs: 90,
            settle_wait_ms: 2500,
            download_timeout_secs: 120,
            output_dir: PathBuf::from("downloads"),
            urls_file: PathBuf::from("scraped_urls.txt"),
            jobs: 1,
            blocked_substrings: default_blocked_substrings(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("vgrab")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<VgrabConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = VgrabConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: VgrabConfig = toml::from_str(&data)?;
    Ok(cfg)
}
