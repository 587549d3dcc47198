//! CLI for the vgrab video harvester/downloader.

mod commands;
#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vgrab_core::config;

use commands::{run_download, run_grab, GrabArgs};

/// Top-level CLI for vgrab.
#[derive(Debug, Parser)]
#[command(name = "vgrab")]
#[command(about = "vgrab: harvest and download videos from social post/profile pages", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Open a target page in a controlled browser, harvest candidate video
    /// URLs, save the list, and download them.
    Grab {
        /// Target post or profile URL (http/https).
        target_url: String,

        /// Show the browser window instead of running headless.
        #[arg(long)]
        headful: bool,

        /// Persist the raw page HTML next to the URL list for inspection.
        #[arg(long)]
        debug_html: bool,

        /// Maximum scroll rounds (default from config: 12).
        #[arg(long, value_name = "N")]
        scroll_max: Option<u32>,

        /// Delay per scroll round in milliseconds (default from config: 2000).
        #[arg(long, value_name = "MS")]
        wait_ms: Option<u64>,

        /// File the discovered URLs are written to.
        #[arg(long, value_name = "PATH")]
        urls_file: Option<PathBuf>,

        /// Directory downloaded files are written to.
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Only harvest and save the URL list; skip the download phase.
        #[arg(long)]
        no_download: bool,
    },

    /// Download videos from a newline-delimited URL list file.
    Download {
        /// Path to the URL list (one URL per line).
        input_file: PathBuf,

        /// Directory downloaded files are written to.
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Number of concurrent download workers (default from config: 1).
        #[arg(long, value_name = "N")]
        jobs: Option<usize>,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Grab {
                target_url,
                headful,
                debug_html,
                scroll_max,
                wait_ms,
                urls_file,
                output_dir,
                no_download,
            } => {
                run_grab(
                    &cfg,
                    GrabArgs {
                        target_url,
                        headful,
                        debug_html,
                        scroll_max,
                        wait_ms,
                        urls_file,
                        output_dir,
                        no_download,
                    },
                )
                .await
            }
            CliCommand::Download {
                input_file,
                output_dir,
                jobs,
            } => run_download(&cfg, &input_file, output_dir, jobs).await,
        }
    }
}
